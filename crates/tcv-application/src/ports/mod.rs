//! Ports
//!
//! Capabilities a fixture opts into, and the sources candidates come from.

pub mod lifecycle;
pub mod registry;
pub mod source;

pub use lifecycle::{Cleanup, ConfigureServices, Setup, TestFixture, TestResult};
pub use registry::{LinkedCandidates, TEST_CLASSES, TestClassEntry, linked_classes};
pub use source::CandidateSource;
