//! Per-object, per-action failure history.
//!
//! Behaviors report "I failed to pick up / stack on / place / roll object X
//! here".  Other behaviors and strategies then ask whether X recently failed,
//! optionally near a given pose, before trying the same thing again.
//!
//! # Retention
//!
//! Each `(object, action)` list is capped by [`FailureCaps`]; when a new
//! record would exceed the cap, the oldest record is evicted.

use std::collections::VecDeque;

use ai_core::{ObjectId, Pose3d, Timestamp, ANY_ANGLE};
use rustc_hash::FxHashMap;

use crate::config::FailureCaps;

/// The closed set of reasons an object use can fail.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectUseAction {
    PickUpObject,
    StackOnObject,
    PlaceObjectAt,
    RollOrPopAWheelie,
}

impl ObjectUseAction {
    pub const ALL: [ObjectUseAction; 4] = [
        ObjectUseAction::PickUpObject,
        ObjectUseAction::StackOnObject,
        ObjectUseAction::PlaceObjectAt,
        ObjectUseAction::RollOrPopAWheelie,
    ];

    #[inline]
    fn slot(self) -> usize {
        match self {
            ObjectUseAction::PickUpObject      => 0,
            ObjectUseAction::StackOnObject     => 1,
            ObjectUseAction::PlaceObjectAt     => 2,
            ObjectUseAction::RollOrPopAWheelie => 3,
        }
    }

    /// Record-count cap for this action.
    pub fn cap(self, caps: &FailureCaps) -> usize {
        match self {
            ObjectUseAction::PickUpObject      => caps.pick_up,
            ObjectUseAction::StackOnObject     => caps.stack_on,
            ObjectUseAction::PlaceObjectAt     => caps.place_at,
            ObjectUseAction::RollOrPopAWheelie => caps.roll_or_pop,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FailureRecord {
    pub pose: Pose3d,
    pub at:   Timestamp,
}

/// Which objects a [`FailureQuery`] looks at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObjectTarget {
    Any,
    Id(ObjectId),
}

/// Match test for a single record.
///
/// * `recent_secs < 0` disables the recency filter.
/// * `at_pose == None` or `dist_threshold_mm < 0` disables the distance filter.
/// * `at_pose == None` or `angle_threshold >= PI` disables the angle filter.
///
/// Every enabled bound is inclusive.  Location filters additionally require
/// both poses to share an origin.
pub fn entry_matches(
    record:            &FailureRecord,
    now:               Timestamp,
    recent_secs:       f64,
    at_pose:           Option<&Pose3d>,
    dist_threshold_mm: f32,
    angle_threshold:   f32,
) -> bool {
    if recent_secs >= 0.0 && now > record.at + recent_secs {
        return false;
    }
    let Some(at) = at_pose else {
        return true;
    };
    let check_dist = dist_threshold_mm >= 0.0;
    let check_angle = angle_threshold < ANY_ANGLE;
    if (check_dist || check_angle) && !record.pose.same_origin(at) {
        return false;
    }
    if check_dist && record.pose.distance_mm(at) > dist_threshold_mm {
        return false;
    }
    if check_angle && record.pose.angular_distance(at) > angle_threshold {
        return false;
    }
    true
}

// ── FailureQuery ──────────────────────────────────────────────────────────────

/// A failure lookup: which objects, which actions (OR-ed), and the optional
/// recency and location windows.
#[derive(Clone, Debug)]
pub struct FailureQuery {
    pub target:            ObjectTarget,
    pub actions:           Vec<ObjectUseAction>,
    pub recent_secs:       f64,
    pub at_pose:           Option<Pose3d>,
    pub dist_threshold_mm: f32,
    pub angle_threshold:   f32,
}

impl FailureQuery {
    /// Any failure of `action` on `id`, ever, anywhere.
    pub fn object(id: ObjectId, action: ObjectUseAction) -> Self {
        Self {
            target:            ObjectTarget::Id(id),
            actions:           vec![action],
            recent_secs:       -1.0,
            at_pose:           None,
            dist_threshold_mm: -1.0,
            angle_threshold:   ANY_ANGLE,
        }
    }

    /// Any failure of `action` on any object.
    pub fn any(action: ObjectUseAction) -> Self {
        Self { target: ObjectTarget::Any, ..Self::object(ObjectId::INVALID, action) }
    }

    /// Also match failures of `action`.
    pub fn or_action(mut self, action: ObjectUseAction) -> Self {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        self
    }

    /// Only failures no older than `secs`.
    pub fn recent(mut self, secs: f64) -> Self {
        self.recent_secs = secs;
        self
    }

    /// Only failures recorded within `dist_mm` / `angle` of `pose`.
    pub fn near(mut self, pose: Pose3d, dist_mm: f32, angle: f32) -> Self {
        self.at_pose = Some(pose);
        self.dist_threshold_mm = dist_mm;
        self.angle_threshold = angle;
        self
    }

    fn matches(&self, record: &FailureRecord, now: Timestamp) -> bool {
        entry_matches(
            record,
            now,
            self.recent_secs,
            self.at_pose.as_ref(),
            self.dist_threshold_mm,
            self.angle_threshold,
        )
    }
}

// ── FailureTables ─────────────────────────────────────────────────────────────

/// One table per [`ObjectUseAction`], keyed by object id.
#[derive(Debug, Default)]
pub struct FailureTables {
    tables: [FxHashMap<ObjectId, VecDeque<FailureRecord>>; 4],
}

impl FailureTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, evicting the oldest past the action's cap.
    /// Returns the number of evicted records.
    pub fn record(
        &mut self,
        id:     ObjectId,
        action: ObjectUseAction,
        record: FailureRecord,
        caps:   &FailureCaps,
    ) -> usize {
        let cap = action.cap(caps).max(1);
        let list = self.tables[action.slot()].entry(id).or_default();
        list.push_back(record);
        let mut evicted = 0;
        while list.len() > cap {
            list.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Records for one object and action, oldest first.
    pub fn records(&self, id: ObjectId, action: ObjectUseAction) -> impl Iterator<Item = &FailureRecord> {
        self.tables[action.slot()].get(&id).into_iter().flatten()
    }

    pub fn any_match(&self, query: &FailureQuery, now: Timestamp) -> bool {
        query.actions.iter().any(|&action| {
            let table = &self.tables[action.slot()];
            match query.target {
                ObjectTarget::Id(id) => table
                    .get(&id)
                    .is_some_and(|list| list.iter().any(|r| query.matches(r, now))),
                ObjectTarget::Any => table
                    .values()
                    .flatten()
                    .any(|r| query.matches(r, now)),
            }
        })
    }

    pub fn len(&self) -> usize {
        self.tables.iter().flat_map(|t| t.values()).map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
