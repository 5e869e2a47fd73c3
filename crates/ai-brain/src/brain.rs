//! The `Brain` struct and its tick loop.

use ai_core::{Tick, TickClock, Timestamp};
use ai_goal::{BehaviorHandle, ContextSource, GoalEvaluator};
use ai_strategy::{DecisionContext, GameEvent};
use ai_whiteboard::{BlockWorld, Whiteboard, WhiteboardFact};

use crate::{BehaviorExecutor, BrainConfig, BrainObserver};

/// Owns the decision state of one robot and drives it tick by tick.
///
/// Inputs arriving between ticks (facts, game events, goal requests) are
/// queued and take effect at the next tick boundary.  Create via
/// [`BrainBuilder`][crate::BrainBuilder].
pub struct Brain<W: BlockWorld, C: ContextSource> {
    pub config: BrainConfig,

    /// Maps ticks to robot time.
    pub clock: TickClock,

    pub whiteboard: Whiteboard,

    /// Located objects.  Callers may mutate it between ticks; the whiteboard
    /// re-derives from it every tick.
    pub world: W,

    pub contexts: C,

    pub evaluator: GoalEvaluator,

    pub(crate) pending_facts: Vec<WhiteboardFact>,
    pub(crate) mood_score:    Option<f32>,
}

impl<W: BlockWorld, C: ContextSource> Brain<W, C> {
    // ── Inputs ────────────────────────────────────────────────────────────

    /// Queue a sensor fact for the next tick.
    pub fn push_fact(&mut self, fact: WhiteboardFact) {
        self.pending_facts.push(fact);
    }

    /// Queue a game event for every strategy.
    pub fn post_event(&mut self, event: GameEvent) {
        self.evaluator.post_event(event);
    }

    pub fn set_mood_score(&mut self, score: Option<f32>) {
        self.mood_score = score;
    }

    #[inline]
    pub fn pending_facts(&self) -> usize {
        self.pending_facts.len()
    }

    #[inline]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run one decision tick and return the behavior that should run.
    pub fn tick<O: BrainObserver>(
        &mut self,
        current_running: Option<&BehaviorHandle>,
        observer:        &mut O,
    ) -> Option<BehaviorHandle> {
        let tick = self.clock.current_tick;
        let now = self.clock.now();
        observer.on_tick_start(tick, now);

        // ① facts
        for fact in std::mem::take(&mut self.pending_facts) {
            self.whiteboard.handle_fact(&fact, &self.world, now);
            if fact == (WhiteboardFact::OffTreadsStateChanged { on_treads: true }) {
                self.evaluator.on_robot_returned_to_treads(now);
            }
        }

        // ② derived state
        self.whiteboard.update(&self.world, now);

        // ③ arbitration
        let ctx = DecisionContext::new(now, &self.whiteboard, &self.world).with_mood(self.mood_score);
        let chosen = self
            .evaluator
            .choose_next_behavior(&ctx, &mut self.contexts, current_running);

        // ④ report
        for switch in self.evaluator.take_switches() {
            observer.on_goal_switch(tick, &switch);
        }
        let goal = self.evaluator.current_goal().map(|g| g.name());
        observer.on_behavior_chosen(tick, now, goal, chosen.as_ref());
        observer.on_tick_end(tick);

        self.clock.advance();
        chosen
    }

    /// Run exactly `n` ticks against `executor`.
    pub fn run_ticks<E: BehaviorExecutor, O: BrainObserver>(
        &mut self,
        n:        u64,
        executor: &mut E,
        observer: &mut O,
    ) {
        for _ in 0..n {
            let now = self.clock.now();
            let running = executor.running_behavior();
            let chosen = self.tick(running.as_ref(), observer);
            executor.apply(chosen.as_ref(), now);
        }
        observer.on_run_end(self.clock.current_tick);
    }
}
