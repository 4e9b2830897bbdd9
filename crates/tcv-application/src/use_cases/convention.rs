//! Convention entry point
//!
//! Wires discovery and execution for one run. The host supplies the
//! requested tags and, optionally, the application services every test
//! class container starts from.

use crate::model::{CandidateClass, TestPlan};
use crate::ports::CandidateSource;
use crate::use_cases::{DiscoveryFilter, ExecutionOrchestrator, ScopeBuilder, ServiceConfigurator};
use std::sync::Arc;
use tcv_domain::RunSummary;
use tcv_domain::TagSet;
use tcv_domain::error::Result;
use tcv_domain::ports::ResultReporter;
use tcv_infrastructure::config::ConventionConfig;
use tcv_infrastructure::di::ServiceCollection;
use tcv_infrastructure::reporting::TracingReporter;
use tracing::info;

/// The two-phase test convention: discover, then execute
#[derive(Clone)]
pub struct TestingConvention {
    requested_tags: TagSet,
    configure_additional_services: Option<ServiceConfigurator>,
    config: Arc<ConventionConfig>,
    reporter: Arc<dyn ResultReporter>,
}

impl TestingConvention {
    /// Convention for `requested_tags` with default configuration
    pub fn new<I, S>(requested_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder().tags(requested_tags).build()
    }

    pub fn builder() -> TestingConventionBuilder {
        TestingConventionBuilder::default()
    }

    /// Tags requested for this run, including configured ones
    pub fn requested_tags(&self) -> &TagSet {
        &self.requested_tags
    }

    pub fn config(&self) -> &ConventionConfig {
        &self.config
    }

    /// Discovery phase
    pub fn discover(&self, candidates: &[CandidateClass]) -> TestPlan {
        DiscoveryFilter::new(self.requested_tags.clone())
            .with_retain_empty_classes(self.config.discovery.retain_empty_classes)
            .discover(candidates)
    }

    /// Execution phase
    pub async fn execute(&self, plan: &TestPlan) -> Result<RunSummary> {
        let scope_builder = ScopeBuilder::new(
            self.configure_additional_services.clone(),
            Arc::clone(&self.config),
        );
        ExecutionOrchestrator::new(scope_builder, Arc::clone(&self.reporter))
            .with_cleanup_after_failed_setup(self.config.execution.cleanup_after_failed_setup)
            .run(plan)
            .await
    }

    /// Discover from `source`, then execute the resulting plan
    pub async fn run<S: CandidateSource + ?Sized>(&self, source: &S) -> Result<RunSummary> {
        let candidates = source.candidates();
        let plan = self.discover(&candidates);
        info!(
            classes = plan.class_count(),
            cases = plan.case_count(),
            tags = %self.requested_tags,
            "Test plan ready"
        );
        self.execute(&plan).await
    }
}

impl std::fmt::Debug for TestingConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestingConvention")
            .field("requested_tags", &self.requested_tags)
            .field(
                "configure_additional_services",
                &self.configure_additional_services.is_some(),
            )
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TestingConvention`]
#[derive(Default)]
pub struct TestingConventionBuilder {
    tags: TagSet,
    configure_additional_services: Option<ServiceConfigurator>,
    config: Option<ConventionConfig>,
    reporter: Option<Arc<dyn ResultReporter>>,
}

impl TestingConventionBuilder {
    /// Request one tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Request several tags
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags);
        self
    }

    /// Application services every class container starts from
    pub fn configure_additional_services<F>(mut self, configure: F) -> Self
    where
        F: Fn(&mut ServiceCollection) + Send + Sync + 'static,
    {
        self.configure_additional_services = Some(Arc::new(configure));
        self
    }

    /// Loaded configuration; its discovery tags are added to the requested ones
    pub fn config(mut self, config: ConventionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Where outcomes go; logs through `tracing` by default
    pub fn reporter(mut self, reporter: Arc<dyn ResultReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn build(self) -> TestingConvention {
        let config = self.config.unwrap_or_default();
        let mut requested_tags = self.tags;
        requested_tags.extend(config.discovery.tags.iter().cloned());

        TestingConvention {
            requested_tags,
            configure_additional_services: self.configure_additional_services,
            config: Arc::new(config),
            reporter: self
                .reporter
                .unwrap_or_else(|| Arc::new(TracingReporter::new())),
        }
    }
}
