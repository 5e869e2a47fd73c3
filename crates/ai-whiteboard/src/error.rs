use ai_core::ObjectId;
use thiserror::Error;

use crate::failure::ObjectUseAction;

#[derive(Debug, Error)]
pub enum WhiteboardError {
    #[error("{0:?} failures must be reported with an explicit location")]
    LocationRequired(ObjectUseAction),

    #[error("object {0} is not known to the block world")]
    UnknownObject(ObjectId),

    #[error("no active beacon")]
    NoActiveBeacon,

    #[error("unknown object use intention '{0}'")]
    UnknownIntention(String),
}

pub type WhiteboardResult<T> = Result<T, WhiteboardError>;
