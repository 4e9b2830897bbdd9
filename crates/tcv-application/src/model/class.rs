//! Candidate classes
//!
//! A class is declared once through [`CandidateClass::builder`], which binds
//! the fixture type and whichever lifecycle capabilities it implements.

use super::method::CandidateMethod;
use super::{FixtureInstance, downcast_fixture};
use crate::ports::{Cleanup, ConfigureServices, Setup, TestFixture, TestResult};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::any::{TypeId, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tcv_domain::TagSet;
use tcv_infrastructure::di::{ServiceCollection, ServiceScope};

type HookFn = fn(FixtureInstance) -> tcv_domain::Result<BoxFuture<'static, TestResult>>;

/// A test class, before filtering
///
/// Immutable once built. Cloning is cheap and shares the declaration.
#[derive(Clone)]
pub struct CandidateClass {
    inner: Arc<ClassDeclaration>,
}

struct ClassDeclaration {
    name: String,
    tags: TagSet,
    public: bool,
    excluded: bool,
    methods: Vec<CandidateMethod>,
    fixture_type: TypeId,
    fixture_name: &'static str,
    register: fn(&mut ServiceCollection),
    resolve: fn(&ServiceScope) -> tcv_domain::Result<FixtureInstance>,
    setup: Option<HookFn>,
    cleanup: Option<HookFn>,
    configure_services: Option<fn(&mut ServiceCollection)>,
}

impl CandidateClass {
    /// Start declaring a class for fixture `T`
    pub fn builder<T: TestFixture>(name: impl Into<String>) -> ClassBuilder<T> {
        ClassBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn tags(&self) -> &TagSet {
        &self.inner.tags
    }

    pub fn is_public(&self) -> bool {
        self.inner.public
    }

    pub fn is_excluded(&self) -> bool {
        self.inner.excluded
    }

    /// Candidate methods in declaration order
    pub fn methods(&self) -> &[CandidateMethod] {
        &self.inner.methods
    }

    /// Type of the fixture this class resolves to
    pub fn fixture_type(&self) -> TypeId {
        self.inner.fixture_type
    }

    pub fn fixture_name(&self) -> &'static str {
        self.inner.fixture_name
    }

    pub fn has_setup(&self) -> bool {
        self.inner.setup.is_some()
    }

    pub fn has_cleanup(&self) -> bool {
        self.inner.cleanup.is_some()
    }

    pub fn has_configure_services(&self) -> bool {
        self.inner.configure_services.is_some()
    }

    /// Register the fixture as a scoped service
    pub fn register_fixture(&self, services: &mut ServiceCollection) {
        (self.inner.register)(services);
    }

    /// Apply the class's own registrations, if it declares any
    pub fn configure_services(&self, services: &mut ServiceCollection) {
        if let Some(configure) = self.inner.configure_services {
            configure(services);
        }
    }

    /// Resolve the fixture from a case scope
    pub fn resolve_fixture(&self, scope: &ServiceScope) -> tcv_domain::Result<FixtureInstance> {
        (self.inner.resolve)(scope)
    }

    /// Start the Setup hook, if declared
    pub fn setup(
        &self,
        instance: &FixtureInstance,
    ) -> Option<tcv_domain::Result<BoxFuture<'static, TestResult>>> {
        self.inner.setup.map(|hook| hook(Arc::clone(instance)))
    }

    /// Start the Cleanup hook, if declared
    pub fn cleanup(
        &self,
        instance: &FixtureInstance,
    ) -> Option<tcv_domain::Result<BoxFuture<'static, TestResult>>> {
        self.inner.cleanup.map(|hook| hook(Arc::clone(instance)))
    }
}

impl fmt::Debug for CandidateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateClass")
            .field("name", &self.inner.name)
            .field("fixture", &self.inner.fixture_name)
            .field("tags", &self.inner.tags)
            .field("public", &self.inner.public)
            .field("excluded", &self.inner.excluded)
            .field("methods", &self.inner.methods)
            .field("setup", &self.has_setup())
            .field("cleanup", &self.has_cleanup())
            .field("configure_services", &self.has_configure_services())
            .finish()
    }
}

/// Builder for [`CandidateClass`]
///
/// Classes are public and not excluded unless stated otherwise.
pub struct ClassBuilder<T> {
    name: String,
    tags: TagSet,
    public: bool,
    excluded: bool,
    methods: Vec<CandidateMethod>,
    setup: Option<HookFn>,
    cleanup: Option<HookFn>,
    configure_services: Option<fn(&mut ServiceCollection)>,
    _fixture: PhantomData<fn() -> T>,
}

impl<T: TestFixture> ClassBuilder<T> {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: TagSet::new(),
            public: true,
            excluded: false,
            methods: Vec::new(),
            setup: None,
            cleanup: None,
            configure_services: None,
            _fixture: PhantomData,
        }
    }

    /// Attach one tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Attach several tags
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags);
        self
    }

    /// Mark the class as not publicly visible
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Exclude the class from discovery and from resolvable registration
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Add a candidate method
    pub fn method(mut self, method: CandidateMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a test method with no parameters
    pub fn test<F, Fut>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(Arc<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TestResult> + Send + 'static,
    {
        self.method(CandidateMethod::new::<T, _, _>(name, body))
    }

    pub fn build(self) -> CandidateClass {
        CandidateClass {
            inner: Arc::new(ClassDeclaration {
                name: self.name,
                tags: self.tags,
                public: self.public,
                excluded: self.excluded,
                methods: self.methods,
                fixture_type: TypeId::of::<T>(),
                fixture_name: type_name::<T>(),
                register: register_fixture::<T>,
                resolve: resolve_fixture::<T>,
                setup: self.setup,
                cleanup: self.cleanup,
                configure_services: self.configure_services,
            }),
        }
    }
}

impl<T: TestFixture + Setup> ClassBuilder<T> {
    /// Run [`Setup::setup`] before every case
    pub fn with_setup(mut self) -> Self {
        self.setup = Some(setup_hook::<T>);
        self
    }
}

impl<T: TestFixture + Cleanup> ClassBuilder<T> {
    /// Run [`Cleanup::cleanup`] after every case
    pub fn with_cleanup(mut self) -> Self {
        self.cleanup = Some(cleanup_hook::<T>);
        self
    }
}

impl<T: TestFixture + ConfigureServices> ClassBuilder<T> {
    /// Apply [`ConfigureServices::configure_services`] to this class's container
    pub fn with_configure_services(mut self) -> Self {
        self.configure_services = Some(T::configure_services);
        self
    }
}

fn register_fixture<T: TestFixture>(services: &mut ServiceCollection) {
    services.add_scoped::<T, _>(|scope| T::create(scope).map(Arc::new));
}

fn resolve_fixture<T: TestFixture>(scope: &ServiceScope) -> tcv_domain::Result<FixtureInstance> {
    let fixture: FixtureInstance = scope.resolve::<T>()?;
    Ok(fixture)
}

fn setup_hook<T: TestFixture + Setup>(
    instance: FixtureInstance,
) -> tcv_domain::Result<BoxFuture<'static, TestResult>> {
    let fixture = downcast_fixture::<T>(instance)?;
    Ok(async move { fixture.setup().await }.boxed())
}

fn cleanup_hook<T: TestFixture + Cleanup>(
    instance: FixtureInstance,
) -> tcv_domain::Result<BoxFuture<'static, TestResult>> {
    let fixture = downcast_fixture::<T>(instance)?;
    Ok(async move { fixture.cleanup().await }.boxed())
}
