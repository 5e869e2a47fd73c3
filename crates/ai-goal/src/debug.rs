//! Out-of-band "force this goal" handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared handle a console or test harness uses to force a goal by name.
///
/// Clones share the same slot.  The evaluator reads it once per tick.
#[derive(Clone, Debug, Default)]
pub struct DebugGoalOverride {
    slot: Arc<Mutex<Option<String>>>,
}

impl DebugGoalOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force(&self, goal: impl Into<String>) {
        *self.lock() = Some(goal.into());
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn get(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        // Poisoning is ignored: the slot always holds a complete value.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
