//! Configuration
//!
//! Figment-based loading of [`ConventionConfig`] from defaults, a TOML file
//! and `TCV__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
