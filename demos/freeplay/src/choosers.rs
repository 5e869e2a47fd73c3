//! Demo behavior choosers and the factory the goal table is built with.

use ai_core::{BehaviorId, Timestamp};
use ai_goal::{BehaviorChooser, BehaviorHandle, ChooserConfig, ChooserFactory, GoalError, GoalResult};
use ai_strategy::DecisionContext;

/// Always wants the same behavior.
pub struct SingleChooser(BehaviorHandle);

impl BehaviorChooser for SingleChooser {
    fn desired_active_behavior(
        &mut self,
        _ctx:     &DecisionContext<'_>,
        _current: Option<&BehaviorHandle>,
    ) -> Option<BehaviorHandle> {
        Some(self.0.clone())
    }
}

/// Runs its behaviors one after another, restarting from the first each
/// time the goal is activated.  Once the last one finishes it reports
/// nothing, which hands control back to the evaluator.
pub struct SequenceChooser {
    behaviors: Vec<BehaviorHandle>,
    next:      usize,
}

impl BehaviorChooser for SequenceChooser {
    fn desired_active_behavior(
        &mut self,
        _ctx:    &DecisionContext<'_>,
        current: Option<&BehaviorHandle>,
    ) -> Option<BehaviorHandle> {
        if let Some(running) = current.filter(|r| self.behaviors.iter().any(|b| b.is(r))) {
            return Some(running.clone());
        }
        let chosen = self.behaviors.get(self.next).cloned();
        self.next += 1;
        chosen
    }

    fn on_activated(&mut self, _now: Timestamp) {
        self.next = 0;
    }
}

/// Hands out behavior ids in table order.
#[derive(Default)]
pub struct DemoChooserFactory {
    next_id: u32,
}

impl DemoChooserFactory {
    fn handle(&mut self, name: &str) -> BehaviorHandle {
        let id = BehaviorId(self.next_id);
        self.next_id += 1;
        BehaviorHandle::new(id, name)
    }
}

impl ChooserFactory for DemoChooserFactory {
    fn make_chooser(&mut self, goal: &str, config: &ChooserConfig) -> GoalResult<Box<dyn BehaviorChooser>> {
        match (config.kind.as_str(), config.behaviors.as_slice()) {
            ("single", [name]) => Ok(Box::new(SingleChooser(self.handle(name)))),
            ("sequence", names) if !names.is_empty() => {
                let behaviors = names.iter().map(|n| self.handle(n)).collect();
                Ok(Box::new(SequenceChooser { behaviors, next: 0 }))
            }
            _ => Err(GoalError::UnknownChooser { goal: goal.to_owned(), kind: config.kind.clone() }),
        }
    }
}
