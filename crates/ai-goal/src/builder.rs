//! Fluent builder for constructing a [`GoalEvaluator`].

use std::collections::{BTreeMap, HashSet};

use ai_core::GoalId;

use crate::context::ContextKey;
use crate::debug::DebugGoalOverride;
use crate::dispatch::PutDownDispatch;
use crate::error::{GoalError, GoalResult};
use crate::evaluator::GoalEvaluator;
use crate::goal::Goal;

/// Fluent builder for [`GoalEvaluator`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                        |
/// |------------------------|--------------------------------|
/// | `.goal(g)`/`.goals(v)` | no goals                       |
/// | `.debug_override(h)`   | a fresh, unshared handle       |
/// | `.put_down(d)`         | `PutDownDispatch::default()`   |
/// | `.object_tap_goal(n)`  | none                           |
///
/// # Example
///
/// ```rust,ignore
/// let console = DebugGoalOverride::new();
/// let evaluator = GoalEvaluatorBuilder::new()
///     .goals(build_goals(configs, &mut factory))
///     .debug_override(console.clone())
///     .build()?;
/// ```
#[derive(Default)]
pub struct GoalEvaluatorBuilder {
    goals:          Vec<Goal>,
    debug_override: Option<DebugGoalOverride>,
    put_down:       PutDownDispatch,
    object_tap:     Option<String>,
}

impl GoalEvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goal(mut self, goal: Goal) -> Self {
        self.goals.push(goal);
        self
    }

    pub fn goals(mut self, goals: impl IntoIterator<Item = Goal>) -> Self {
        self.goals.extend(goals);
        self
    }

    /// Share a force-goal handle with a console or test harness.
    pub fn debug_override(mut self, handle: DebugGoalOverride) -> Self {
        self.debug_override = Some(handle);
        self
    }

    pub fn put_down(mut self, dispatch: PutDownDispatch) -> Self {
        self.put_down = dispatch;
        self
    }

    /// Goal to request when the user taps an object.
    pub fn object_tap_goal(mut self, name: impl Into<String>) -> Self {
        self.object_tap = Some(name.into());
        self
    }

    /// Group goals by context, sort each group by priority, and reject
    /// duplicate priorities within a group and duplicate names overall.
    pub fn build(self) -> GoalResult<GoalEvaluator> {
        if self.goals.len() >= GoalId::INVALID.index() {
            return Err(GoalError::TooManyGoals(self.goals.len()));
        }

        {
            let mut names = HashSet::with_capacity(self.goals.len());
            for goal in &self.goals {
                if !names.insert(goal.name()) {
                    return Err(GoalError::DuplicateName(goal.name().to_owned()));
                }
            }
        }

        let mut groups: BTreeMap<ContextKey, Vec<GoalId>> = BTreeMap::new();
        for (i, goal) in self.goals.iter().enumerate() {
            groups
                .entry(goal.required_context().clone())
                .or_default()
                .push(GoalId(i as u16));
        }

        for (context, ids) in &mut groups {
            ids.sort_by_key(|id| self.goals[id.index()].priority());
            if let Some(pair) = ids.windows(2).find(|w| {
                self.goals[w[0].index()].priority() == self.goals[w[1].index()].priority()
            }) {
                let (first, second) = (&self.goals[pair[0].index()], &self.goals[pair[1].index()]);
                return Err(GoalError::DuplicatePriority {
                    context:  context.clone(),
                    priority: first.priority(),
                    first:    first.name().to_owned(),
                    second:   second.name().to_owned(),
                });
            }
        }

        tracing::info!(
            goals = self.goals.len(),
            contexts = groups.len(),
            "GoalEvaluator.Built"
        );

        Ok(GoalEvaluator::from_parts(
            self.goals,
            groups,
            self.debug_override.unwrap_or_default(),
            self.put_down,
            self.object_tap,
        ))
    }
}
