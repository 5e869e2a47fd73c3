use std::fmt;

use ai_core::Timestamp;
use ai_strategy::{DecisionContext, GoalStrategy};

use crate::behavior::{BehaviorChooser, BehaviorHandle};
use crate::context::ContextKey;

/// A named, prioritized unit of behavior selection.
///
/// Owns its strategy and chooser; only [`enter`](Self::enter) and
/// [`exit`](Self::exit) change its timestamps.
pub struct Goal {
    name:             String,
    priority:         u8,
    required_context: ContextKey,
    strategy:         GoalStrategy,
    chooser:          Box<dyn BehaviorChooser>,
    last_started_at:  Option<Timestamp>,
    last_stopped_at:  Option<Timestamp>,
}

impl Goal {
    pub fn new(
        name:             impl Into<String>,
        priority:         u8,
        required_context: ContextKey,
        strategy:         GoalStrategy,
        chooser:          Box<dyn BehaviorChooser>,
    ) -> Self {
        Self {
            name: name.into(),
            priority,
            required_context,
            strategy,
            chooser,
            last_started_at: None,
            last_stopped_at: None,
        }
    }

    pub fn enter(&mut self, now: Timestamp) {
        self.last_started_at = Some(now);
        self.chooser.on_activated(now);
    }

    pub fn exit(&mut self, now: Timestamp) {
        self.last_stopped_at = Some(now);
        self.chooser.on_deactivated(now);
    }

    #[inline]
    pub fn choose_next_behavior(
        &mut self,
        ctx:             &DecisionContext<'_>,
        current_running: Option<&BehaviorHandle>,
    ) -> Option<BehaviorHandle> {
        self.chooser.desired_active_behavior(ctx, current_running)
    }

    /// Strategy end check measured from this goal's last start.  A goal that
    /// never started is treated as starting now.
    pub fn wants_to_end(&self, ctx: &DecisionContext<'_>) -> bool {
        self.strategy
            .wants_to_end(ctx, self.last_started_at.unwrap_or(ctx.now))
    }

    pub fn wants_to_start(&self, ctx: &DecisionContext<'_>) -> bool {
        self.strategy.wants_to_start(ctx, self.last_stopped_at)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn priority(&self) -> u8 {
        self.priority
    }

    #[inline]
    pub fn required_context(&self) -> &ContextKey {
        &self.required_context
    }

    #[inline]
    pub fn strategy(&self) -> &GoalStrategy {
        &self.strategy
    }

    #[inline]
    pub fn strategy_mut(&mut self) -> &mut GoalStrategy {
        &mut self.strategy
    }

    #[inline]
    pub fn last_started_at(&self) -> Option<Timestamp> {
        self.last_started_at
    }

    #[inline]
    pub fn last_stopped_at(&self) -> Option<Timestamp> {
        self.last_stopped_at
    }
}

impl fmt::Debug for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Goal")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("required_context", &self.required_context)
            .field("strategy", &self.strategy.kind.name())
            .field("last_started_at", &self.last_started_at)
            .field("last_stopped_at", &self.last_stopped_at)
            .finish_non_exhaustive()
    }
}
