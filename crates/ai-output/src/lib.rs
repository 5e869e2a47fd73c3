//! `ai-output`: decision-log writers for the rust_ai framework.
//!
//! | File                   | Columns                                         |
//! |------------------------|-------------------------------------------------|
//! | `goal_switches.csv`    | `tick, time_secs, from_goal, to_goal, context`  |
//! | `behavior_choices.csv` | `tick, time_secs, goal, behavior`               |
//!
//! Absent goals and behaviors are written as empty cells.  The writer is
//! driven by [`DecisionLogObserver`], which implements
//! `ai_brain::BrainObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ai_output::{CsvDecisionWriter, DecisionLogObserver};
//!
//! let writer = CsvDecisionWriter::new(Path::new("./decisions"))?;
//! let mut obs = DecisionLogObserver::new(writer);
//! brain.run_ticks(600, &mut executor, &mut obs);
//! if let Some(e) = obs.take_error() { tracing::error!(error = %e, "decision log failed"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvDecisionWriter;
pub use error::{OutputError, OutputResult};
pub use observer::DecisionLogObserver;
pub use row::{BehaviorChoiceRow, GoalSwitchRow};
pub use writer::DecisionWriter;
