//! Fixture capabilities
//!
//! A test class is a [`TestFixture`] constructed from its case scope. The
//! optional hooks are capability traits bound when the class is declared,
//! so a class without a hook simply never implements it.

use async_trait::async_trait;
use tcv_infrastructure::di::{ServiceCollection, ServiceScope};

/// Result of a test body or lifecycle hook
pub type TestResult = anyhow::Result<()>;

/// A test class instance, resolved once per test method
pub trait TestFixture: Send + Sync + Sized + 'static {
    /// Construct the fixture, resolving its collaborators from `scope`
    fn create(scope: &ServiceScope) -> tcv_domain::Result<Self>;
}

/// Runs before every test case of the class
#[async_trait]
pub trait Setup: Send + Sync {
    async fn setup(&self) -> TestResult;
}

/// Runs after every test case of the class, even when the body failed
#[async_trait]
pub trait Cleanup: Send + Sync {
    async fn cleanup(&self) -> TestResult;
}

/// Per-class service registrations
///
/// Called after the baseline services and the test classes were registered,
/// so anything added here replaces an earlier registration for the same
/// type, for this class only.
pub trait ConfigureServices {
    fn configure_services(services: &mut ServiceCollection);
}
