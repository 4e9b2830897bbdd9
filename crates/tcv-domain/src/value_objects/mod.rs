//! Value objects

pub mod outcome;
pub mod parameters;
pub mod tags;

pub use outcome::{CaseReport, Outcome, RunSummary};
pub use parameters::ParameterSet;
pub use tags::TagSet;

/// JSON value used for parameter rows
pub use serde_json::Value;
