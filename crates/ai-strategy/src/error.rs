use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("unknown strategy type '{0}'")]
    UnknownType(String),

    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("unknown object use intention '{0}'")]
    UnknownIntention(String),

    #[error("{field} must not be negative (got {value})")]
    NegativeDuration { field: &'static str, value: f64 },

    #[error("min_run_secs ({min}) exceeds max_run_secs ({max})")]
    MinExceedsMax { min: f64, max: f64 },

    #[error("{0} strategy needs at least one event")]
    NoEvents(&'static str),

    #[error("CompositeHasWork strategy has no work checks enabled")]
    NoWorkChecks,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}

pub type StrategyResult<T> = Result<T, StrategyError>;
