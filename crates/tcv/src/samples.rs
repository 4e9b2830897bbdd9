//! Sample test classes
//!
//! Show the convention end to end: lifecycle hooks around parameterized
//! cases, and per-class service overrides.

use async_trait::async_trait;
use linkme::distributed_slice;
use std::sync::Arc;
use tcv::infrastructure::di::{ServiceCollection, ServiceScope};
use tcv::{
    CandidateClass, CandidateMethod, Cleanup, ConfigureServices, Setup, TEST_CLASSES,
    TestClassEntry, TestFixture, TestResult, params,
};
use tracing::info;

/// Baseline services for every sample class
pub fn configure_additional_services(services: &mut ServiceCollection) {
    info!("Configuring additional services");
    services.add_scoped::<dyn MessageService, _>(|_| {
        Ok(Arc::new(DefaultMessageService) as Arc<dyn MessageService>)
    });
}

pub trait MessageService: Send + Sync {
    fn message(&self) -> &'static str;
}

pub struct DefaultMessageService;

impl MessageService for DefaultMessageService {
    fn message(&self) -> &'static str {
        "Default Implementation"
    }
}

pub struct MockMessageService;

impl MessageService for MockMessageService {
    fn message(&self) -> &'static str {
        "Mock Implementation"
    }
}

pub struct AlternativeMockMessageService;

impl MessageService for AlternativeMockMessageService {
    fn message(&self) -> &'static str {
        "Alternative Mock Implementation"
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

pub struct LifecycleExamples;

impl TestFixture for LifecycleExamples {
    fn create(_scope: &ServiceScope) -> tcv::domain::Result<Self> {
        Ok(Self)
    }
}

#[async_trait]
impl Setup for LifecycleExamples {
    async fn setup(&self) -> TestResult {
        info!("Sample Setup");
        Ok(())
    }
}

#[async_trait]
impl Cleanup for LifecycleExamples {
    async fn cleanup(&self) -> TestResult {
        info!("Sample Cleanup");
        Ok(())
    }
}

async fn always_pass(_fixture: Arc<LifecycleExamples>) -> TestResult {
    Ok(())
}

async fn subtract(_fixture: Arc<LifecycleExamples>, row: tcv::ParameterSet) -> TestResult {
    let x: i64 = row.arg(0)?;
    let y: i64 = row.arg(1)?;
    let expected: i64 = row.arg(2)?;
    anyhow::ensure!(
        x - y == expected,
        "{x} - {y} should be {expected}, was {}",
        x - y
    );
    Ok(())
}

fn lifecycle_examples() -> CandidateClass {
    CandidateClass::builder::<LifecycleExamples>("LifecycleExamples")
        .tags(["lifecycle", "smoke"])
        .with_setup()
        .with_cleanup()
        .method(
            CandidateMethod::new::<LifecycleExamples, _, _>("AlwaysPass", always_pass)
                .with_tag("smoke"),
        )
        .method(
            CandidateMethod::parameterized::<LifecycleExamples, _, _>("Subtract", subtract)
                .with_tag("lifecycle")
                .with_row(params![5, 3, 2])
                .with_row(params![8, 5, 3]),
        )
        .build()
}

#[distributed_slice(TEST_CLASSES)]
static LIFECYCLE_EXAMPLES: TestClassEntry = TestClassEntry {
    name: "LifecycleExamples",
    factory: lifecycle_examples,
};

// ---------------------------------------------------------------------------
// Per-class service configuration
// ---------------------------------------------------------------------------

pub struct ConfigureServicesTests {
    service: Arc<dyn MessageService>,
}

impl TestFixture for ConfigureServicesTests {
    fn create(scope: &ServiceScope) -> tcv::domain::Result<Self> {
        Ok(Self {
            service: scope.resolve::<dyn MessageService>()?,
        })
    }
}

impl ConfigureServices for ConfigureServicesTests {
    fn configure_services(services: &mut ServiceCollection) {
        info!("ConfigureServices called for ConfigureServicesTests");
        services.add_scoped::<dyn MessageService, _>(|_| {
            Ok(Arc::new(MockMessageService) as Arc<dyn MessageService>)
        });
    }
}

async fn uses_mock_service(fixture: Arc<ConfigureServicesTests>) -> TestResult {
    anyhow::ensure!(fixture.service.message() == "Mock Implementation");
    Ok(())
}

fn configure_services_tests() -> CandidateClass {
    CandidateClass::builder::<ConfigureServicesTests>("ConfigureServicesTests")
        .tag("di")
        .with_configure_services()
        .method(
            CandidateMethod::new::<ConfigureServicesTests, _, _>(
                "ShouldUseMockService",
                uses_mock_service,
            )
            .with_tag("di"),
        )
        .method(
            CandidateMethod::new::<ConfigureServicesTests, _, _>(
                "ShouldHaveSameServiceInstanceInSameTestClass",
                uses_mock_service,
            )
            .with_tag("di"),
        )
        .build()
}

#[distributed_slice(TEST_CLASSES)]
static CONFIGURE_SERVICES_TESTS: TestClassEntry = TestClassEntry {
    name: "ConfigureServicesTests",
    factory: configure_services_tests,
};

pub struct AlternativeConfigureServicesTests {
    service: Arc<dyn MessageService>,
}

impl TestFixture for AlternativeConfigureServicesTests {
    fn create(scope: &ServiceScope) -> tcv::domain::Result<Self> {
        Ok(Self {
            service: scope.resolve::<dyn MessageService>()?,
        })
    }
}

impl ConfigureServices for AlternativeConfigureServicesTests {
    fn configure_services(services: &mut ServiceCollection) {
        info!("ConfigureServices called for AlternativeConfigureServicesTests");
        services.add_scoped::<dyn MessageService, _>(|_| {
            Ok(Arc::new(AlternativeMockMessageService) as Arc<dyn MessageService>)
        });
    }
}

async fn uses_alternative_mock_service(
    fixture: Arc<AlternativeConfigureServicesTests>,
) -> TestResult {
    let message = fixture.service.message();
    anyhow::ensure!(message == "Alternative Mock Implementation");
    Ok(())
}

fn alternative_configure_services_tests() -> CandidateClass {
    CandidateClass::builder::<AlternativeConfigureServicesTests>(
        "AlternativeConfigureServicesTests",
    )
    .tag("di")
    .with_configure_services()
    .method(
        CandidateMethod::new::<AlternativeConfigureServicesTests, _, _>(
            "ShouldUseAlternativeMockService",
            uses_alternative_mock_service,
        )
        .with_tag("di"),
    )
    .build()
}

#[distributed_slice(TEST_CLASSES)]
static ALTERNATIVE_CONFIGURE_SERVICES_TESTS: TestClassEntry = TestClassEntry {
    name: "AlternativeConfigureServicesTests",
    factory: alternative_configure_services_tests,
};
