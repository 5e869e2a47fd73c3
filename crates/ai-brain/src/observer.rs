//! Brain observer trait for decision logging and progress reporting.

use ai_core::{Tick, Timestamp};
use ai_goal::{BehaviorHandle, GoalSwitch};

/// Callbacks invoked by [`Brain::tick`][crate::Brain::tick].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait BrainObserver {
    /// Called at the very start of each tick, before facts are applied.
    fn on_tick_start(&mut self, _tick: Tick, _now: Timestamp) {}

    /// Called once per goal change recorded during the tick, in order.
    fn on_goal_switch(&mut self, _tick: Tick, _switch: &GoalSwitch) {}

    /// Called after arbitration with the current goal (if any) and its answer.
    fn on_behavior_chosen(
        &mut self,
        _tick:     Tick,
        _now:      Timestamp,
        _goal:     Option<&str>,
        _behavior: Option<&BehaviorHandle>,
    ) {}

    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called once after [`Brain::run_ticks`][crate::Brain::run_ticks] finishes.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`BrainObserver`] that does nothing.
pub struct NoopObserver;

impl BrainObserver for NoopObserver {}
