//! Configuration types module

pub mod app;
pub mod convention;
pub mod logging;

// Re-export main types
pub use app::ConventionConfig;
pub use convention::{DiscoveryConfig, ExecutionConfig};
pub use logging::LoggingConfig;
