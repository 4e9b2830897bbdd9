//! Service registrations

use super::provider::ServiceProvider;
use super::scope::ServiceScope;
use dill::CatalogBuilder;
use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tcv_domain::error::Result;
use tcv_domain::ports::Disposable;
use tracing::debug;

/// How long a resolved instance lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceLifetime {
    /// One instance per provider
    Singleton,
    /// One instance per scope
    Scoped,
    /// A new instance for every resolution
    Transient,
}

impl fmt::Display for ServiceLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => write!(f, "singleton"),
            Self::Scoped => write!(f, "scoped"),
            Self::Transient => write!(f, "transient"),
        }
    }
}

/// A freshly created instance and, if it owns resources, its disposal handle
pub(crate) struct Activation<T: ?Sized> {
    pub(crate) service: Arc<T>,
    pub(crate) disposable: Option<Arc<dyn Disposable>>,
}

type Factory<T> = Arc<dyn Fn(&ServiceScope) -> Result<Activation<T>> + Send + Sync>;

/// Catalog entry for a service of type `T`
///
/// Stored in the dill catalog as a value; resolution looks it up by type and
/// runs the factory according to the lifetime.
pub(crate) struct Registration<T: ?Sized> {
    pub(crate) lifetime: ServiceLifetime,
    pub(crate) factory: Factory<T>,
}

impl<T: ?Sized> Clone for Registration<T> {
    fn clone(&self) -> Self {
        Self {
            lifetime: self.lifetime,
            factory: Arc::clone(&self.factory),
        }
    }
}

/// Adds one staged registration to a catalog under construction
type Install = Arc<dyn Fn(&mut CatalogBuilder) + Send + Sync>;

#[derive(Clone)]
pub(crate) struct Staged {
    pub(crate) service_name: &'static str,
    pub(crate) lifetime: ServiceLifetime,
    install: Install,
}

impl Staged {
    pub(crate) fn install(&self, builder: &mut CatalogBuilder) {
        (self.install)(builder);
    }
}

/// Mutable set of service registrations
///
/// Registering a type that is already present replaces the earlier
/// registration, which is how a test class substitutes a mock for a real
/// collaborator. Only the surviving registrations reach the catalog.
#[derive(Clone, Default)]
pub struct ServiceCollection {
    staged: HashMap<TypeId, Staged>,
}

impl ServiceCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a singleton created on first resolution
    pub fn add_singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceScope) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.insert::<T>(ServiceLifetime::Singleton, move |scope| {
            factory(scope).map(plain)
        })
    }

    /// Register an already constructed singleton
    pub fn add_instance<T>(&mut self, instance: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.insert::<T>(ServiceLifetime::Singleton, move |_| {
            Ok(plain(Arc::clone(&instance)))
        })
    }

    /// Register a service with one instance per scope
    pub fn add_scoped<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceScope) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.insert::<T>(ServiceLifetime::Scoped, move |scope| factory(scope).map(plain))
    }

    /// Register a service created anew on every resolution
    pub fn add_transient<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceScope) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.insert::<T>(ServiceLifetime::Transient, move |scope| {
            factory(scope).map(plain)
        })
    }

    /// Register a singleton that is disposed together with the provider
    pub fn add_singleton_disposable<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Disposable + 'static,
        F: Fn(&ServiceScope) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.insert::<T>(ServiceLifetime::Singleton, move |scope| {
            factory(scope).map(disposable)
        })
    }

    /// Register a scoped service that is disposed together with its scope
    pub fn add_scoped_disposable<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Disposable + 'static,
        F: Fn(&ServiceScope) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.insert::<T>(ServiceLifetime::Scoped, move |scope| {
            factory(scope).map(disposable)
        })
    }

    /// Register a transient service disposed together with the resolving scope
    pub fn add_transient_disposable<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Disposable + 'static,
        F: Fn(&ServiceScope) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.insert::<T>(ServiceLifetime::Transient, move |scope| {
            factory(scope).map(disposable)
        })
    }

    /// Remove the registration for `T`, returning whether one existed
    pub fn remove<T: ?Sized + 'static>(&mut self) -> bool {
        self.staged.remove(&TypeId::of::<T>()).is_some()
    }

    /// Check whether `T` is registered
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.staged.contains_key(&TypeId::of::<T>())
    }

    /// Lifetime of the registration for `T`, if any
    pub fn lifetime_of<T: ?Sized + 'static>(&self) -> Option<ServiceLifetime> {
        self.staged
            .get(&TypeId::of::<T>())
            .map(|staged| staged.lifetime)
    }

    /// Number of registrations
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Whether there are no registrations
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Registered type names, sorted
    pub fn service_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.staged.values().map(|staged| staged.service_name).collect();
        names.sort_unstable();
        names
    }

    /// Freeze the registrations into a dill catalog owned by a provider
    pub fn build(self) -> ServiceProvider {
        let mut builder = CatalogBuilder::new();
        for staged in self.staged.values() {
            staged.install(&mut builder);
        }
        let registered = self.into_names();
        ServiceProvider::new(builder.build(), registered)
    }

    pub(crate) fn into_staged(self) -> HashMap<TypeId, Staged> {
        self.staged
    }

    fn into_names(self) -> HashMap<TypeId, &'static str> {
        self.staged
            .into_iter()
            .map(|(key, staged)| (key, staged.service_name))
            .collect()
    }

    fn insert<T: ?Sized + Send + Sync + 'static>(
        &mut self,
        lifetime: ServiceLifetime,
        factory: impl Fn(&ServiceScope) -> Result<Activation<T>> + Send + Sync + 'static,
    ) -> &mut Self {
        let service_name = type_name::<T>();
        let registration = Registration::<T> {
            lifetime,
            factory: Arc::new(factory),
        };
        let staged = Staged {
            service_name,
            lifetime,
            install: Arc::new(move |builder: &mut CatalogBuilder| {
                builder.add_value(registration.clone());
            }),
        };
        if let Some(previous) = self.staged.insert(TypeId::of::<T>(), staged) {
            debug!(
                service = service_name,
                previous = %previous.lifetime,
                current = %lifetime,
                "Replaced service registration"
            );
        }
        self
    }
}

impl fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCollection")
            .field("services", &self.service_names())
            .finish()
    }
}

fn plain<T: ?Sized>(service: Arc<T>) -> Activation<T> {
    Activation {
        service,
        disposable: None,
    }
}

fn disposable<T: Disposable + 'static>(service: Arc<T>) -> Activation<T> {
    let handle: Arc<dyn Disposable> = service.clone();
    Activation {
        service,
        disposable: Some(handle),
    }
}
