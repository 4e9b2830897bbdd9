//! # Infrastructure Layer
//!
//! Technical capabilities the convention engine is built on.
//!
//! ### Configuration & DI
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via Figment |
//! | [`di`] | Service container with singleton, scoped and transient lifetimes |
//! | [`constants`] | Centralized configuration constants |
//! | [`serialization`] | Shared JSON settings for fixtures |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`reporting`] | Result reporter that writes outcomes to the log |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod reporting;
pub mod serialization;

// Re-export commonly used types
pub use error_ext::ErrorContext;
