//! Test Class Registry
//!
//! Auto-registration of test classes at link time. Fixture crates submit a
//! [`TestClassEntry`] into the [`TEST_CLASSES`] distributed slice and the
//! convention discovers them through [`LinkedCandidates`]:
//!
//! ```ignore
//! use tcv_application::{CandidateClass, TEST_CLASSES, TestClassEntry};
//!
//! #[linkme::distributed_slice(TEST_CLASSES)]
//! static CALCULATOR_TESTS: TestClassEntry = TestClassEntry {
//!     name: "CalculatorTests",
//!     factory: calculator_tests,
//! };
//!
//! fn calculator_tests() -> CandidateClass {
//!     CandidateClass::builder::<CalculatorTests>("CalculatorTests")
//!         .test("Adds", |fixture| async move { fixture.adds() })
//!         .build()
//! }
//! ```

use super::CandidateSource;
use crate::model::CandidateClass;
use tracing::debug;

/// Registry entry for a test class
pub struct TestClassEntry {
    /// Class name, used for diagnostics
    pub name: &'static str,
    /// Builds the class declaration
    pub factory: fn() -> CandidateClass,
}

// Auto-collection via linkme distributed slices - fixture crates submit entries at link time
#[linkme::distributed_slice]
pub static TEST_CLASSES: [TestClassEntry] = [..];

/// Build every registered class, in link order
pub fn linked_classes() -> Vec<CandidateClass> {
    TEST_CLASSES.iter().map(|entry| (entry.factory)()).collect()
}

/// Candidate source backed by [`TEST_CLASSES`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedCandidates;

impl CandidateSource for LinkedCandidates {
    fn candidates(&self) -> Vec<CandidateClass> {
        let classes = linked_classes();
        debug!(classes = classes.len(), "Collected linked test classes");
        classes
    }
}
