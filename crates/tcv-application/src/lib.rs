//! Application Layer - TCV
//!
//! The two-phase test convention: discovery turns candidate classes and
//! methods into a [`TestPlan`], execution runs the plan case by case inside
//! isolated resolution scopes.
//!
//! ## Architecture
//!
//! ```text
//! CandidateSource ─► DiscoveryFilter ─► TestPlan ─► ExecutionOrchestrator ─► ResultReporter
//!                     (TagMatcher)                  (ScopeBuilder)
//! ```
//!
//! ## Modules
//!
//! - `model`: candidate classes, candidate methods, the test plan
//! - `ports`: fixture capabilities (`Setup`, `Cleanup`, `ConfigureServices`)
//!   and candidate sources, including the link-time class registry
//! - `use_cases`: tag matching, discovery, scope building, execution and the
//!   [`TestingConvention`] entry point
//!
//! ## Dependencies
//!
//! This crate depends on:
//! - `tcv-domain`: tags, parameter rows, outcomes, reporter port
//! - `tcv-infrastructure`: the service container and configuration types

pub mod model;
pub mod ports;
pub mod use_cases;

pub use model::*;
pub use ports::*;
pub use use_cases::*;
