//! `ai-goal`: goals and the evaluator that arbitrates between them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`goal`]      | `Goal`: priority, context, strategy, chooser, timestamps       |
//! | [`behavior`]  | `BehaviorHandle`, `BehaviorChooser` trait, `NoBehaviorChooser` |
//! | [`context`]   | `ContextKey`, `ContextSource` trait, `ManualContextSource`     |
//! | [`evaluator`] | `GoalEvaluator`, `GoalSwitch`                                  |
//! | [`builder`]   | `GoalEvaluatorBuilder` (priority-uniqueness check)             |
//! | [`debug`]     | `DebugGoalOverride`: shared force-goal handle                  |
//! | [`dispatch`]  | `PutDownDispatch`                                              |
//! | [`loader`]    | `GoalConfig`, `ChooserConfig`, `ChooserFactory`, CSV loading   |
//! | [`error`]     | `GoalError`, `GoalResult<T>`                                   |
//!
//! # Design notes
//!
//! The evaluator holds goals in a `Vec` and refers to the current one by
//! [`GoalId`][ai_core::GoalId], never by reference.  Goals in a context are
//! ordered by priority once at build time; lower numbers win.

pub mod behavior;
pub mod builder;
pub mod context;
pub mod debug;
pub mod dispatch;
pub mod error;
pub mod evaluator;
pub mod goal;
pub mod loader;


pub use behavior::{BehaviorChooser, BehaviorHandle, NoBehaviorChooser};
pub use builder::GoalEvaluatorBuilder;
pub use context::{ContextKey, ContextSource, ManualContextSource};
pub use debug::DebugGoalOverride;
pub use dispatch::PutDownDispatch;
pub use error::{GoalError, GoalResult};
pub use evaluator::{GoalEvaluator, GoalSwitch};
pub use goal::Goal;
pub use loader::{
    build_goals, goal_from_config, load_goal_configs_csv, load_goal_configs_reader, ChooserConfig,
    ChooserFactory, GoalConfig,
};
