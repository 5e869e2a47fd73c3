//! `ai-whiteboard`: the shared blackboard behaviors and strategies read.
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`whiteboard`]| `Whiteboard`, `EdgeInfo`                                        |
//! | [`world`]     | `BlockWorld` collaborator trait, `MemoryWorld`                  |
//! | [`object`]    | `WorldObject`, `ObjectFamily`                                   |
//! | [`possible`]  | `PossibleObject`, `SearchedEmpty`                               |
//! | [`failure`]   | `ObjectUseAction`, `FailureRecord`, `FailureQuery`, `entry_matches` |
//! | [`beacon`]    | `Beacon`                                                        |
//! | [`intention`] | `ObjectUseIntention`, per-tick valid/best cache                 |
//! | [`fact`]      | `WhiteboardFact` (queued sensor input)                          |
//! | [`config`]    | `WhiteboardConfig`, `FailureCaps`                               |
//! | [`error`]     | `WhiteboardError`, `WhiteboardResult`                           |
//!
//! # Consistency within a tick
//!
//! Best/valid objects per intention are computed once in
//! [`Whiteboard::update`] and only read afterwards, so every consumer in the
//! same tick sees the same answer.

pub mod beacon;
pub mod config;
pub mod error;
pub mod fact;
pub mod failure;
pub mod intention;
pub mod object;
pub mod possible;
pub mod whiteboard;
pub mod world;

#[cfg(test)]
mod tests;

pub use beacon::Beacon;
pub use config::{FailureCaps, WhiteboardConfig};
pub use error::{WhiteboardError, WhiteboardResult};
pub use fact::WhiteboardFact;
pub use failure::{entry_matches, FailureQuery, FailureRecord, FailureTables, ObjectTarget, ObjectUseAction};
pub use intention::{IntentionEntry, ObjectUseIntention};
pub use object::{ObjectFamily, WorldObject};
pub use possible::{PossibleObject, SearchedEmpty};
pub use whiteboard::{EdgeInfo, Whiteboard};
pub use world::{BlockWorld, MemoryWorld};
