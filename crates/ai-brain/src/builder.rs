//! Fluent builder for constructing a [`Brain`].

use ai_goal::{ContextSource, GoalEvaluatorBuilder};
use ai_whiteboard::{BlockWorld, Whiteboard};

use crate::{Brain, BrainConfig, BrainError, BrainResult};

/// Fluent builder for [`Brain<W, C>`].
///
/// # Required inputs
///
/// - [`BrainConfig`]: tick duration, start time, whiteboard tuning
/// - `W: BlockWorld`: the located-object model
/// - `C: ContextSource`: the mode manager
///
/// # Optional inputs
///
/// | Method            | Default                          |
/// |-------------------|----------------------------------|
/// | `.evaluator(b)`   | An evaluator with no goals       |
/// | `.mood_score(s)`  | `None` (mood-gated goals blocked)|
pub struct BrainBuilder<W: BlockWorld, C: ContextSource> {
    config:     BrainConfig,
    world:      W,
    contexts:   C,
    evaluator:  Option<GoalEvaluatorBuilder>,
    mood_score: Option<f32>,
}

impl<W: BlockWorld, C: ContextSource> BrainBuilder<W, C> {
    pub fn new(config: BrainConfig, world: W, contexts: C) -> Self {
        Self { config, world, contexts, evaluator: None, mood_score: None }
    }

    pub fn evaluator(mut self, builder: GoalEvaluatorBuilder) -> Self {
        self.evaluator = Some(builder);
        self
    }

    pub fn mood_score(mut self, score: f32) -> Self {
        self.mood_score = Some(score);
        self
    }

    /// Validate the config, build the evaluator, and return a ready brain.
    pub fn build(self) -> BrainResult<Brain<W, C>> {
        let dt = self.config.tick_duration_secs;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(BrainError::Config(format!(
                "tick_duration_secs must be positive, got {dt}"
            )));
        }
        if !self.config.start_secs.is_finite() {
            return Err(BrainError::Config("start_secs must be finite".into()));
        }

        let evaluator = self.evaluator.unwrap_or_default().build()?;
        tracing::info!(
            goals = evaluator.goals().len(),
            tick_duration_secs = dt,
            "Brain.Built"
        );

        Ok(Brain {
            clock:         self.config.make_clock(),
            whiteboard:    Whiteboard::new(self.config.whiteboard.clone()),
            config:        self.config,
            world:         self.world,
            contexts:      self.contexts,
            evaluator,
            pending_facts: Vec::new(),
            mood_score:    self.mood_score,
        })
    }
}
