//! `ai-brain`: tick orchestrator for the rust_ai framework.
//!
//! # Tick loop
//!
//! ```text
//! every tick:
//!   ① Facts     : drain queued WhiteboardFacts into the whiteboard;
//!                  returning to the treads also notifies the evaluator.
//!   ② Update    : Whiteboard::update (stale origins, searched-empty marks,
//!                  intention cache).
//!   ③ Arbitrate : GoalEvaluator::choose_next_behavior with the behavior
//!                  the executor reports as running.
//!   ④ Report    : goal switches and the chosen behavior go to the observer;
//!                  the clock advances.
//! ```
//!
//! | Module       | Contents                                         |
//! |--------------|--------------------------------------------------|
//! | [`brain`]    | `Brain` and its tick loop                        |
//! | [`builder`]  | `BrainBuilder` with config validation            |
//! | [`config`]   | `BrainConfig` (serde)                            |
//! | [`executor`] | `BehaviorExecutor` collaborator trait            |
//! | [`observer`] | `BrainObserver` hooks and `NoopObserver`         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ai_brain::{BrainBuilder, BrainConfig, NoopObserver};
//! use ai_goal::{GoalEvaluatorBuilder, ManualContextSource};
//!
//! let mut brain = BrainBuilder::new(BrainConfig::default(), world, ManualContextSource::default())
//!     .evaluator(GoalEvaluatorBuilder::new().goals(goals))
//!     .build()?;
//! brain.run_ticks(100, &mut executor, &mut NoopObserver);
//! ```

pub mod brain;
pub mod builder;
pub mod config;
pub mod error;
pub mod executor;
pub mod observer;


pub use brain::Brain;
pub use builder::BrainBuilder;
pub use config::BrainConfig;
pub use error::{BrainError, BrainResult};
pub use executor::BehaviorExecutor;
pub use observer::{BrainObserver, NoopObserver};
