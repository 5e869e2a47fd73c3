use ai_core::{TickClock, Timestamp};
use ai_whiteboard::WhiteboardConfig;
use serde::Deserialize;

/// Tuning for one [`Brain`][crate::Brain].
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    /// Seconds of robot time per control tick.  Must be positive.
    pub tick_duration_secs: f64,
    /// Robot time at tick 0.
    pub start_secs:         f64,
    pub whiteboard:         WhiteboardConfig,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs: 0.1,
            start_secs:         0.0,
            whiteboard:         WhiteboardConfig::default(),
        }
    }
}

impl BrainConfig {
    pub fn make_clock(&self) -> TickClock {
        TickClock::new(Timestamp::from_secs(self.start_secs), self.tick_duration_secs)
    }
}
