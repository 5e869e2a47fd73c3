use ai_core::Timestamp;
use ai_goal::BehaviorHandle;

/// The behavior system the brain drives.
///
/// [`Brain::run_ticks`][crate::Brain::run_ticks] asks it what is running
/// before each tick and hands it the choice afterwards.
pub trait BehaviorExecutor {
    fn running_behavior(&self) -> Option<BehaviorHandle>;

    /// `None` (or a no-op handle) means nothing should run.
    fn apply(&mut self, chosen: Option<&BehaviorHandle>, now: Timestamp);
}
