//! The `DecisionWriter` trait implemented by log backends.

use crate::{BehaviorChoiceRow, GoalSwitchRow, OutputResult};

/// Sink for decision-log rows.
///
/// Errors are stored by [`DecisionLogObserver`][crate::DecisionLogObserver]
/// and retrieved with its `take_error`.
pub trait DecisionWriter {
    fn write_goal_switch(&mut self, row: &GoalSwitchRow) -> OutputResult<()>;

    fn write_behavior_choice(&mut self, row: &BehaviorChoiceRow) -> OutputResult<()>;

    /// Flush and close.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
