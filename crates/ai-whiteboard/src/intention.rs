//! Object-use intentions and their per-tick valid/best cache.

use std::collections::BTreeSet;
use std::str::FromStr;

use ai_core::ObjectId;

use crate::error::WhiteboardError;
use crate::failure::ObjectUseAction;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectUseIntention {
    PickUpAnyObject,
    PickUpObjectWithAxisCheck,
    RollObjectWithAxisCheck,
    RollObjectNoAxisCheck,
    PopAWheelieOnObject,
}

impl ObjectUseIntention {
    pub const ALL: [ObjectUseIntention; 5] = [
        ObjectUseIntention::PickUpAnyObject,
        ObjectUseIntention::PickUpObjectWithAxisCheck,
        ObjectUseIntention::RollObjectWithAxisCheck,
        ObjectUseIntention::RollObjectNoAxisCheck,
        ObjectUseIntention::PopAWheelieOnObject,
    ];

    #[inline]
    pub(crate) fn slot(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ObjectUseIntention::PickUpAnyObject           => "PickUpAnyObject",
            ObjectUseIntention::PickUpObjectWithAxisCheck => "PickUpObjectWithAxisCheck",
            ObjectUseIntention::RollObjectWithAxisCheck   => "RollObjectWithAxisCheck",
            ObjectUseIntention::RollObjectNoAxisCheck     => "RollObjectNoAxisCheck",
            ObjectUseIntention::PopAWheelieOnObject       => "PopAWheelieOnObject",
        }
    }

    /// The failure table that disqualifies an object for this intention.
    pub fn failure_action(self) -> ObjectUseAction {
        match self {
            ObjectUseIntention::PickUpAnyObject
            | ObjectUseIntention::PickUpObjectWithAxisCheck => ObjectUseAction::PickUpObject,
            ObjectUseIntention::RollObjectWithAxisCheck
            | ObjectUseIntention::RollObjectNoAxisCheck
            | ObjectUseIntention::PopAWheelieOnObject => ObjectUseAction::RollOrPopAWheelie,
        }
    }
}

impl FromStr for ObjectUseIntention {
    type Err = WhiteboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectUseIntention::ALL
            .into_iter()
            .find(|i| i.name() == s)
            .ok_or_else(|| WhiteboardError::UnknownIntention(s.to_owned()))
    }
}

/// Result of the last `update()` for one intention.
#[derive(Clone, Debug, Default)]
pub struct IntentionEntry {
    pub valid: BTreeSet<ObjectId>,
    pub best:  Option<ObjectId>,
}

#[derive(Debug, Default)]
pub struct IntentionCache {
    entries: [IntentionEntry; 5],
}

impl IntentionCache {
    #[inline]
    pub fn get(&self, intention: ObjectUseIntention) -> &IntentionEntry {
        &self.entries[intention.slot()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, intention: ObjectUseIntention) -> &mut IntentionEntry {
        &mut self.entries[intention.slot()]
    }
}
