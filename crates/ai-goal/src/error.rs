use ai_strategy::StrategyError;
use thiserror::Error;

use crate::context::ContextKey;

#[derive(Debug, Error)]
pub enum GoalError {
    #[error("goals '{first}' and '{second}' share priority {priority} in context '{context}'")]
    DuplicatePriority {
        context:  ContextKey,
        priority: u8,
        first:    String,
        second:   String,
    },

    #[error("more than one goal is named '{0}'")]
    DuplicateName(String),

    #[error("{0} goals exceed the goal id space")]
    TooManyGoals(usize),

    #[error("goal '{goal}': {source}")]
    Strategy {
        goal:   String,
        #[source]
        source: StrategyError,
    },

    #[error("goal '{goal}': unknown chooser '{kind}'")]
    UnknownChooser { goal: String, kind: String },

    #[error("goal table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GoalResult<T> = Result<T, GoalError>;
