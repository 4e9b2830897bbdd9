//! # TCV
//!
//! A test convention engine. Candidate test classes are filtered by
//! visibility, exclusion markers, reserved lifecycle names and requested
//! tags, then executed one case at a time: each class gets its own service
//! container, each test method its own scope, and every case runs
//! Setup → body → Cleanup.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tcv::{CandidateClass, CandidateMethod, TestFixture, TestingConvention, params};
//! use tcv::infrastructure::di::ServiceScope;
//!
//! struct Calculator;
//!
//! impl TestFixture for Calculator {
//!     fn create(_scope: &ServiceScope) -> tcv::domain::Result<Self> {
//!         Ok(Self)
//!     }
//! }
//!
//! let class = CandidateClass::builder::<Calculator>("Calculator")
//!     .method(
//!         CandidateMethod::parameterized::<Calculator, _, _>("Subtract", |_, row| async move {
//!             let (x, y, expected): (i64, i64, i64) = (row.arg(0)?, row.arg(1)?, row.arg(2)?);
//!             anyhow::ensure!(x - y == expected);
//!             Ok(())
//!         })
//!         .with_row(params![5, 3, 2]),
//!     )
//!     .build();
//!
//! let summary = TestingConvention::new(Vec::<String>::new())
//!     .run(&vec![class])
//!     .await?;
//! assert!(summary.is_success());
//! ```
//!
//! ## Architecture
//!
//! - `domain` - tags, parameter rows, outcomes, errors and ports
//! - `application` - discovery, scope building, execution orchestration
//! - `infrastructure` - service container, configuration, logging, reporting

/// Domain layer - core types, errors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use tcv_domain::*;
}

/// Application layer - discovery and execution
pub mod application {
    pub use tcv_application::*;
}

/// Infrastructure layer - service container, configuration, logging
pub mod infrastructure {
    pub use tcv_infrastructure::*;
}

pub mod runner;

pub use runner::{RunOptions, run};
pub use tcv_application::{
    CandidateClass, CandidateMethod, CandidateSource, Cleanup, ConfigureServices, LinkedCandidates,
    Setup, TEST_CLASSES, TestClassEntry, TestContext, TestFixture, TestPlan, TestResult,
    TestingConvention,
};
pub use tcv_domain::{Outcome, ParameterSet, RunSummary, TagSet, params};
