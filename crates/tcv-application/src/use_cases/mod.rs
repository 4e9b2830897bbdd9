//! Use cases
//!
//! Discovery, scope building and execution, wired together by
//! [`TestingConvention`].

pub mod convention;
pub mod discovery;
pub mod orchestrator;
pub mod scope_builder;
pub mod tag_matcher;

pub use convention::{TestingConvention, TestingConventionBuilder};
pub use discovery::DiscoveryFilter;
pub use orchestrator::ExecutionOrchestrator;
pub use scope_builder::{ScopeBuilder, ServiceConfigurator};
pub use tag_matcher::TagMatcher;
