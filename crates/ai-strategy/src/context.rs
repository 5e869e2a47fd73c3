//! Read-only state passed to every strategy query.

use ai_core::Timestamp;
use ai_whiteboard::{BlockWorld, Whiteboard};

/// Snapshot a strategy decides from.
///
/// Built by the caller once per tick; all borrows live for that tick's
/// arbitration only.
#[derive(Clone, Copy)]
pub struct DecisionContext<'a> {
    pub now:        Timestamp,
    pub whiteboard: &'a Whiteboard,
    pub world:      &'a dyn BlockWorld,
    /// Latest score from the external mood scorer, if one is wired up.
    pub mood_score: Option<f32>,
}

impl<'a> DecisionContext<'a> {
    #[inline]
    pub fn new(now: Timestamp, whiteboard: &'a Whiteboard, world: &'a dyn BlockWorld) -> Self {
        Self { now, whiteboard, world, mood_score: None }
    }

    #[inline]
    pub fn with_mood(mut self, score: Option<f32>) -> Self {
        self.mood_score = score;
        self
    }
}
