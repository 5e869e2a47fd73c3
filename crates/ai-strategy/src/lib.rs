//! `ai-strategy`: when does a goal want to start, and when to stop.
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`strategy`] | `GoalStrategy`, `StrategyTiming`, `StrategyKind`, `WorkCheck` |
//! | [`context`]  | `DecisionContext<'a>`: per-tick read-only snapshot            |
//! | [`event`]    | `EventTag`, `GameEvent`                                       |
//! | [`config`]   | `StrategyConfig` (flat, serde)                                |
//! | [`error`]    | `StrategyError`, `StrategyResult<T>`                          |
//!
//! # Design notes
//!
//! The set of policies is closed and chosen from config, so it is an enum
//! matched in place rather than a trait object per strategy.  Events never
//! touch goals or the evaluator: [`GoalStrategy::on_event`] only stamps a
//! time that the next `wants_to_end` call reads.

pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod strategy;


pub use config::StrategyConfig;
pub use context::DecisionContext;
pub use error::{StrategyError, StrategyResult};
pub use event::{EventTag, GameEvent};
pub use strategy::{Availability, GoalStrategy, StrategyKind, StrategyTiming, WorkCheck};
