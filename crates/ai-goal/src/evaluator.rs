//! [`GoalEvaluator`]: per-tick goal arbitration.
//!
//! # Per-tick algorithm
//!
//! ```text
//! ① Want new goal?
//!      forced/requested name set and current goal differs        → yes
//!      no current goal, or its context ≠ requested context        → yes
//!      context re-requested after an end request                  → yes, current not repickable
//!      nothing running and current strategy wants to end          → yes
//! ② If not: ask the current goal's chooser.
//!      none / noop                                                → want new, current not repickable
//!      not running and strategy wants to end                      → want new
//!      otherwise                                                  → return it
//! ③ Arbitrate over the requested context's goals, ascending priority:
//!      forced name set        → only that goal, if it is in the group
//!      current, unrepickable  → skip
//!      current                → skip if it wants to end
//!      other                  → skip unless it wants to start
//!    First survivor wins; exit the old goal and enter the new one.
//! ④ Ask the (possibly new) current goal's chooser in the same tick.
//! ```

use std::collections::BTreeMap;

use ai_core::{GoalId, Timestamp};
use ai_strategy::{DecisionContext, GameEvent};

use crate::behavior::BehaviorHandle;
use crate::context::{ContextKey, ContextSource};
use crate::debug::DebugGoalOverride;
use crate::dispatch::PutDownDispatch;
use crate::goal::Goal;

/// One change of the current goal.
#[derive(Clone, Debug, PartialEq)]
pub struct GoalSwitch {
    pub from:    Option<String>,
    pub to:      Option<String>,
    /// Context that was requested when the switch happened.
    pub context: ContextKey,
    pub at:      Timestamp,
}

/// Owns every goal and decides which one is current.
///
/// Built by [`GoalEvaluatorBuilder`][crate::GoalEvaluatorBuilder], which
/// guarantees that no two goals in one context share a priority.
pub struct GoalEvaluator {
    goals:              Vec<Goal>,
    /// Goal ids per context, ascending priority.
    groups:             BTreeMap<ContextKey, Vec<GoalId>>,
    current:            Option<GoalId>,
    debug_override:     DebugGoalOverride,
    requested_goal:     Option<String>,
    put_down:           PutDownDispatch,
    /// Goal requested when the user taps an object.
    object_tap:         Option<String>,
    pending_events:     Vec<GameEvent>,
    switches:           Vec<GoalSwitch>,
    /// Context we already complained about; cleared once a goal is picked.
    warned_no_goal_for: Option<ContextKey>,
    /// Set after an empty-handed start-and-end tick was reported.
    warned_empty_tick:  bool,
}

impl GoalEvaluator {
    pub(crate) fn from_parts(
        goals:          Vec<Goal>,
        groups:         BTreeMap<ContextKey, Vec<GoalId>>,
        debug_override: DebugGoalOverride,
        put_down:       PutDownDispatch,
        object_tap:     Option<String>,
    ) -> Self {
        debug_assert!(groups.values().all(|ids| {
            ids.windows(2)
                .all(|w| goals[w[0].index()].priority() < goals[w[1].index()].priority())
        }));
        Self {
            goals,
            groups,
            current: None,
            debug_override,
            requested_goal: None,
            put_down,
            object_tap,
            pending_events: Vec::new(),
            switches: Vec::new(),
            warned_no_goal_for: None,
            warned_empty_tick: false,
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────────

    /// Decide which behavior should run.  Called once per control tick.
    ///
    /// Never fails: arbitration misses are logged and yield `None` or the
    /// current goal's answer.
    pub fn choose_next_behavior(
        &mut self,
        ctx:             &DecisionContext<'_>,
        contexts:        &mut dyn ContextSource,
        current_running: Option<&BehaviorHandle>,
    ) -> Option<BehaviorHandle> {
        self.drain_events();

        let requested_ctx = contexts.requested_context();
        let end_requested = contexts.take_end_request();
        let target = self
            .debug_override
            .get()
            .or_else(|| self.requested_goal.clone());
        let had_goal = self.current.is_some();

        // ① want a new goal?
        let mut want_new = false;
        let mut current_not_repickable = false;
        match self.current {
            None => want_new = true,
            Some(cur) => {
                let goal = &self.goals[cur.index()];
                if target.as_deref().is_some_and(|name| name != goal.name()) {
                    want_new = true;
                }
                if goal.required_context() != &requested_ctx {
                    want_new = true;
                } else if end_requested {
                    tracing::info!(context = %requested_ctx, goal = goal.name(), "GoalEvaluator.ContextReselected");
                    want_new = true;
                    current_not_repickable = true;
                }
                if !want_new && current_running.is_none() && goal.wants_to_end(ctx) {
                    want_new = true;
                }
            }
        }

        // ② keep the current goal if it still has something to do
        if let (false, Some(cur)) = (want_new, self.current) {
            let goal = &mut self.goals[cur.index()];
            let chosen = goal.choose_next_behavior(ctx, current_running);
            match &chosen {
                None => {
                    want_new = true;
                    current_not_repickable = true;
                }
                Some(b) if b.is_noop() => {
                    want_new = true;
                    current_not_repickable = true;
                }
                Some(b) => {
                    let running = current_running.is_some_and(|r| r.is(b));
                    if !running && goal.wants_to_end(ctx) {
                        want_new = true;
                    }
                }
            }
            if !want_new {
                return chosen;
            }
        }

        // ③ arbitrate
        self.reselect(ctx, contexts, &requested_ctx, target.as_deref(), current_not_repickable);

        if had_goal || self.current.is_some() {
            self.warned_empty_tick = false;
        } else if !self.warned_empty_tick {
            tracing::error!(context = %requested_ctx, "GoalEvaluator.NoGoalAfterSelection");
            self.warned_empty_tick = true;
        }

        // ④ same-tick delegation
        let cur = self.current?;
        let chosen = self.goals[cur.index()].choose_next_behavior(ctx, current_running);
        if chosen.as_ref().is_none_or(BehaviorHandle::is_noop) {
            tracing::debug!(goal = self.goals[cur.index()].name(), "GoalEvaluator.NewGoalChoseNothing");
        }
        chosen
    }

    fn reselect(
        &mut self,
        ctx:                    &DecisionContext<'_>,
        contexts:               &mut dyn ContextSource,
        requested_ctx:          &ContextKey,
        target:                 Option<&str>,
        current_not_repickable: bool,
    ) {
        self.requested_goal = None;
        let Some(group) = self.groups.get(requested_ctx) else {
            if self.warned_no_goal_for.as_ref() != Some(requested_ctx) {
                tracing::warn!(context = %requested_ctx, "GoalEvaluator.NoGoalsForContext");
                self.warned_no_goal_for = Some(requested_ctx.clone());
            }
            return;
        };

        // A forced name outside the active group selects nothing.
        let winner = match target {
            Some(name) => group.iter().copied().find(|id| self.goals[id.index()].name() == name),
            None => group.iter().copied().find(|&id| {
                let goal = &self.goals[id.index()];
                if self.current == Some(id) {
                    !current_not_repickable && !goal.wants_to_end(ctx)
                } else {
                    goal.wants_to_start(ctx)
                }
            }),
        };

        if winner == self.current {
            if winner.is_some() {
                self.warned_no_goal_for = None;
            }
            return;
        }

        let from = self.current.map(|id| self.goals[id.index()].name().to_owned());
        if let Some(old) = self.current {
            self.goals[old.index()].exit(ctx.now);
        }
        self.current = winner;

        let to = match winner {
            Some(new) => {
                let goal = &mut self.goals[new.index()];
                goal.enter(ctx.now);
                contexts.on_context_switched(goal.required_context());
                self.warned_no_goal_for = None;
                Some(goal.name().to_owned())
            }
            None => {
                if self.warned_no_goal_for.as_ref() != Some(requested_ctx) {
                    tracing::warn!(context = %requested_ctx, "GoalEvaluator.NoGoalSelected");
                    self.warned_no_goal_for = Some(requested_ctx.clone());
                }
                None
            }
        };

        tracing::info!(
            from = from.as_deref().unwrap_or("none"),
            to = to.as_deref().unwrap_or("none"),
            context = %requested_ctx,
            "GoalEvaluator.NewGoalSelected"
        );
        self.switches.push(GoalSwitch {
            from,
            to,
            context: requested_ctx.clone(),
            at: ctx.now,
        });
    }

    // ── Inputs between ticks ──────────────────────────────────────────────────

    /// Queue an event for every strategy; applied at the start of the next tick.
    pub fn post_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    fn drain_events(&mut self) {
        for event in std::mem::take(&mut self.pending_events) {
            for goal in &mut self.goals {
                goal.strategy_mut().on_event(&event);
            }
        }
    }

    /// Ask for `name` at the next reselection only.  The debug override wins
    /// over this when both are set.
    pub fn request_goal(&mut self, name: impl Into<String>) {
        self.requested_goal = Some(name.into());
    }

    #[inline]
    pub fn requested_goal(&self) -> Option<&str> {
        self.requested_goal.as_deref()
    }

    /// The robot was set down; request whatever goal the dispatch table
    /// names for what it can see.
    pub fn on_robot_put_down(&mut self, sees_face: bool, sees_cube: bool) {
        if let Some(name) = self.put_down.goal_for(sees_face, sees_cube) {
            tracing::info!(goal = name, sees_face, sees_cube, "GoalEvaluator.PutDownDispatch");
            self.requested_goal = Some(name.to_owned());
        }
    }

    /// An object was tapped; request the configured tap-interaction goal.
    /// Returns `false` when no such goal is configured.
    pub fn on_object_tapped(&mut self) -> bool {
        let Some(name) = self.object_tap.as_deref() else {
            return false;
        };
        tracing::info!(goal = name, "GoalEvaluator.ObjectTapRequested");
        self.requested_goal = Some(name.to_owned());
        true
    }

    /// Withdraw a tap-interaction request that has not been acted on yet.
    /// Other requests are left alone.
    pub fn clear_object_tap_request(&mut self) {
        if self.object_tap.is_some() && self.requested_goal == self.object_tap {
            self.requested_goal = None;
        }
    }

    pub fn is_current_goal_object_tap(&self) -> bool {
        self.object_tap
            .as_deref()
            .is_some_and(|tap| self.current_goal().is_some_and(|g| g.name() == tap))
    }

    /// Back on the treads: drop a default-context goal so a fresh one is
    /// picked next tick.  A debug-forced goal stays.
    pub fn on_robot_returned_to_treads(&mut self, now: Timestamp) {
        let Some(cur) = self.current else {
            return;
        };
        let goal = &self.goals[cur.index()];
        if !goal.required_context().is_default() {
            return;
        }
        if self.debug_override.get().as_deref() == Some(goal.name()) {
            return;
        }
        let context = goal.required_context().clone();
        let from = goal.name().to_owned();
        tracing::info!(goal = %from, "GoalEvaluator.ReturnedToTreads");
        self.goals[cur.index()].exit(now);
        self.current = None;
        self.switches.push(GoalSwitch { from: Some(from), to: None, context, at: now });
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn current_goal_id(&self) -> Option<GoalId> {
        self.current
    }

    pub fn current_goal(&self) -> Option<&Goal> {
        self.current.map(|id| &self.goals[id.index()])
    }

    #[inline]
    pub fn goal(&self, id: GoalId) -> Option<&Goal> {
        self.goals.get(id.index())
    }

    #[inline]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal_id(&self, name: &str) -> Option<GoalId> {
        self.goals
            .iter()
            .position(|g| g.name() == name)
            .and_then(|i| GoalId::try_from(i).ok())
    }

    /// Goals of `context`, ascending priority.
    pub fn group(&self, context: &ContextKey) -> &[GoalId] {
        self.groups.get(context).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contexts(&self) -> impl Iterator<Item = &ContextKey> {
        self.groups.keys()
    }

    #[inline]
    pub fn debug_override(&self) -> &DebugGoalOverride {
        &self.debug_override
    }

    /// Goal switches recorded since the last call.
    pub fn take_switches(&mut self) -> Vec<GoalSwitch> {
        std::mem::take(&mut self.switches)
    }
}
