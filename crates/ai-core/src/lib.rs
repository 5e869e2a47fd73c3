//! `ai-core`: foundational types for the `rust_ai` behavior decision core.
//!
//! This crate is a dependency of every other `ai-*` crate.  It has no `ai-*`
//! dependencies and no required external ones (only optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                                         |
//! |----------|------------------------------------------------------------------|
//! | [`ids`]  | `ObjectId`, `ObjectType`, `OriginId`, `GoalId`, `BehaviorId`     |
//! | [`pose`] | `Pose3d`, `Quad2`, `normalize_angle`, `ANY_ANGLE`                |
//! | [`time`] | `Timestamp`, `Tick`, `TickClock`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod ids;
pub mod pose;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{BehaviorId, GoalId, ObjectId, ObjectType, OriginId};
pub use pose::{normalize_angle, Pose3d, Quad2, ANY_ANGLE};
pub use time::{Tick, TickClock, Timestamp};
