//! Per-class container construction

use crate::model::CandidateClass;
use std::sync::Arc;
use tcv_domain::constants::CONFIGURE_SERVICES_METHOD_NAME;
use tcv_infrastructure::config::ConventionConfig;
use tcv_infrastructure::di::{ServiceCollection, ServiceProvider};
use tcv_infrastructure::serialization::JsonSettings;
use tracing::debug;

/// Registrations supplied by the embedding application
pub type ServiceConfigurator = Arc<dyn Fn(&mut ServiceCollection) + Send + Sync>;

/// Builds one isolated container per test class
///
/// Registration order, later entries replacing earlier ones:
/// 1. the application's baseline configurator
/// 2. built-ins: the run's [`ConventionConfig`] and its [`JsonSettings`]
/// 3. every resolvable test class, scoped
/// 4. the class's own [`ConfigureServices`](crate::ports::ConfigureServices) hook
#[derive(Clone)]
pub struct ScopeBuilder {
    baseline: Option<ServiceConfigurator>,
    config: Arc<ConventionConfig>,
}

impl ScopeBuilder {
    pub fn new(baseline: Option<ServiceConfigurator>, config: Arc<ConventionConfig>) -> Self {
        Self { baseline, config }
    }

    /// Build the container `class` runs in
    ///
    /// A fresh provider is built on every call; nothing is cached between
    /// classes.
    pub fn build_class_scope(
        &self,
        class: &CandidateClass,
        resolvable: &[CandidateClass],
    ) -> ServiceProvider {
        let mut services = ServiceCollection::new();

        if let Some(configure) = &self.baseline {
            configure(&mut services);
        }

        services.add_instance(Arc::clone(&self.config));
        services.add_instance::<JsonSettings>(Arc::new(self.config.json.clone()));

        for candidate in resolvable {
            candidate.register_fixture(&mut services);
        }
        if !resolvable
            .iter()
            .any(|candidate| candidate.fixture_type() == class.fixture_type())
        {
            class.register_fixture(&mut services);
        }

        if class.has_configure_services() {
            debug!(
                class = class.name(),
                hook = CONFIGURE_SERVICES_METHOD_NAME,
                "Applying class service configuration"
            );
            class.configure_services(&mut services);
        }

        services.build()
    }
}

impl std::fmt::Debug for ScopeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeBuilder")
            .field("baseline", &self.baseline.is_some())
            .field("config", &self.config)
            .finish()
    }
}
