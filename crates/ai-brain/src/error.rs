use ai_goal::GoalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrainError {
    #[error("brain configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Goal(#[from] GoalError),
}

pub type BrainResult<T> = Result<T, BrainError>;
