//! Asynchronous game/engine events strategies can subscribe to.

use std::str::FromStr;

use ai_core::Timestamp;

use crate::error::StrategyError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventTag {
    CubeTapped,
    FaceObserved,
    PetObserved,
    RobotPickedUp,
    RobotPlacedOnTreads,
    UserRequestedGame,
    VoiceCommand,
    CliffDetected,
}

impl EventTag {
    pub const ALL: [EventTag; 8] = [
        EventTag::CubeTapped,
        EventTag::FaceObserved,
        EventTag::PetObserved,
        EventTag::RobotPickedUp,
        EventTag::RobotPlacedOnTreads,
        EventTag::UserRequestedGame,
        EventTag::VoiceCommand,
        EventTag::CliffDetected,
    ];

    /// Events that count as "the user interacted" for idle timeouts.
    pub const INTERACTIONS: [EventTag; 4] = [
        EventTag::CubeTapped,
        EventTag::RobotPickedUp,
        EventTag::UserRequestedGame,
        EventTag::VoiceCommand,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventTag::CubeTapped          => "CubeTapped",
            EventTag::FaceObserved        => "FaceObserved",
            EventTag::PetObserved         => "PetObserved",
            EventTag::RobotPickedUp       => "RobotPickedUp",
            EventTag::RobotPlacedOnTreads => "RobotPlacedOnTreads",
            EventTag::UserRequestedGame   => "UserRequestedGame",
            EventTag::VoiceCommand        => "VoiceCommand",
            EventTag::CliffDetected       => "CliffDetected",
        }
    }
}

impl FromStr for EventTag {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventTag::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| StrategyError::UnknownEvent(s.to_owned()))
    }
}

/// One delivered event.  Strategies only record its timestamp; it is acted
/// upon at the next arbitration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameEvent {
    pub tag: EventTag,
    pub at:  Timestamp,
}

impl GameEvent {
    #[inline]
    pub fn new(tag: EventTag, at: Timestamp) -> Self {
        Self { tag, at }
    }
}
