//! The seam between goals and the behavior system.

use ai_core::{BehaviorId, Timestamp};
use ai_strategy::DecisionContext;

/// Reference to a concrete behavior owned by the behavior system.
///
/// Two handles name the same behavior when their ids are equal; the name is
/// for logs only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BehaviorHandle {
    pub id:   BehaviorId,
    pub name: String,
    noop:     bool,
}

impl BehaviorHandle {
    pub fn new(id: BehaviorId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), noop: false }
    }

    /// The explicit "nothing to do" sentinel a chooser may return.
    pub fn noop() -> Self {
        Self { id: BehaviorId::INVALID, name: "NoneBehavior".to_owned(), noop: true }
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.noop
    }

    /// Same behavior as `other`.
    #[inline]
    pub fn is(&self, other: &BehaviorHandle) -> bool {
        self.id == other.id
    }
}

/// Picks the concrete behavior a goal wants running.
///
/// The evaluator never looks inside a chooser: it only asks for the desired
/// behavior and reports activation changes through the owning goal.
///
/// # Example
///
/// ```rust,ignore
/// struct Single(BehaviorHandle);
///
/// impl BehaviorChooser for Single {
///     fn desired_active_behavior(
///         &mut self,
///         _ctx: &DecisionContext<'_>,
///         _current: Option<&BehaviorHandle>,
///     ) -> Option<BehaviorHandle> {
///         Some(self.0.clone())
///     }
/// }
/// ```
pub trait BehaviorChooser {
    /// `current_running` is whatever the behavior system is running now, if
    /// anything.  Returning `None` or [`BehaviorHandle::noop`] means this
    /// goal has nothing more to do.
    fn desired_active_behavior(
        &mut self,
        ctx:             &DecisionContext<'_>,
        current_running: Option<&BehaviorHandle>,
    ) -> Option<BehaviorHandle>;

    /// The owning goal became current.
    fn on_activated(&mut self, _now: Timestamp) {}

    /// The owning goal stopped being current.
    fn on_deactivated(&mut self, _now: Timestamp) {}
}

/// A [`BehaviorChooser`] that never has anything to run.
pub struct NoBehaviorChooser;

impl BehaviorChooser for NoBehaviorChooser {
    fn desired_active_behavior(
        &mut self,
        _ctx:     &DecisionContext<'_>,
        _current: Option<&BehaviorHandle>,
    ) -> Option<BehaviorHandle> {
        None
    }
}
