//! # Domain Layer
//!
//! Core types shared by every TCV crate: tags, parameter rows, per-case
//! outcomes, the domain error, and the ports the engine reports through.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Reserved lifecycle and configuration names |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`value_objects`] | Tags, parameter sets, outcomes, run summaries |
//! | [`ports`] | Reporter and disposal contracts |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
