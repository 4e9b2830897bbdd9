//! Resolution scopes

use super::collection::{Registration, ServiceLifetime};
use super::provider::{CachedService, ProviderInner, lock};
use dashmap::DashMap;
use dill::Catalog;
use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tcv_domain::error::{Error, Result};
use tcv_domain::ports::Disposable;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    /// Activates singletons against the class catalog only
    Root,
    /// Scope created by [`ServiceProvider::create_scope`](super::ServiceProvider::create_scope)
    Child,
}

/// An isolated resolution context
///
/// Scoped services are created once per scope and shared inside it.
/// Disposable services created through the scope are released by
/// [`ServiceScope::dispose`] in reverse creation order.
pub struct ServiceScope {
    id: u64,
    kind: ScopeKind,
    provider: Arc<ProviderInner>,
    catalog: Arc<Catalog>,
    local: HashMap<TypeId, &'static str>,
    instances: DashMap<TypeId, CachedService>,
    disposables: Mutex<Vec<Arc<dyn Disposable>>>,
    disposed: AtomicBool,
}

impl ServiceScope {
    pub(crate) fn new(
        provider: Arc<ProviderInner>,
        catalog: Arc<Catalog>,
        local: HashMap<TypeId, &'static str>,
        kind: ScopeKind,
        id: u64,
    ) -> Self {
        Self {
            id,
            kind,
            provider,
            catalog,
            local,
            instances: DashMap::new(),
            disposables: Mutex::new(Vec::new()),
            disposed: AtomicBool::new(false),
        }
    }

    /// Identifier of this scope, unique within its provider
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Resolve an instance of `T`
    ///
    /// Fails when `T` is not registered, its factory fails, the scope or
    /// its provider was disposed, or registrations form a cycle.
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>> {
        let name = type_name::<T>();
        let key = TypeId::of::<T>();
        if self.is_disposed() {
            return Err(Error::scope_disposed(self.to_string()));
        }
        if self.provider.is_disposed() {
            return Err(Error::scope_disposed("service provider"));
        }
        if !self.is_registered::<T>() {
            return Err(Error::service_not_registered(name));
        }
        let _depth = self.provider.enter_resolution(name)?;

        let registration = self
            .catalog
            .get_one::<Registration<T>>()
            .map_err(|e| Error::resolution(name, e.to_string()))?;
        let registration: &Registration<T> = &registration;

        match registration.lifetime {
            ServiceLifetime::Singleton if !self.local.contains_key(&key) => {
                if let Some(cached) = self.provider.cached_singleton(key) {
                    return unwrap_cached(&cached, name);
                }
                let service: CachedService =
                    Arc::new(self.provider.root_scope().activate(registration)?);
                let cached = self.provider.cache_singleton(key, service);
                unwrap_cached(&cached, name)
            }
            ServiceLifetime::Singleton | ServiceLifetime::Scoped => {
                if self.kind == ScopeKind::Root {
                    return Err(Error::resolution(
                        name,
                        "scoped service requested while activating a singleton",
                    ));
                }
                if let Some(existing) = self.instances.get(&key) {
                    return unwrap_cached(existing.value(), name);
                }
                let service: CachedService = Arc::new(self.activate(registration)?);
                let cached = self.instances.entry(key).or_insert(service).value().clone();
                unwrap_cached(&cached, name)
            }
            ServiceLifetime::Transient => self.activate(registration),
        }
    }

    /// Resolve `T` if it is registered
    ///
    /// Returns `Ok(None)` for unregistered types and propagates every other
    /// resolution failure.
    pub fn try_resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>> {
        if !self.is_registered::<T>() {
            return Ok(None);
        }
        self.resolve::<T>().map(Some)
    }

    /// Check whether `T` is visible from this scope
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        let key = TypeId::of::<T>();
        self.local.contains_key(&key) || self.provider.is_registered(key)
    }

    /// Whether [`ServiceScope::dispose`] has run
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Release every disposable created through this scope, newest first
    ///
    /// Idempotent. A disposal failure is logged and does not stop the
    /// remaining disposals.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        let disposables = std::mem::take(&mut *lock(&self.disposables));
        let count = disposables.len();
        for disposable in disposables.into_iter().rev() {
            if let Err(e) = disposable.dispose().await {
                warn!(scope = self.id, error = %e, "Failed to dispose scoped service");
            }
        }
        self.instances.clear();
        debug!(scope = self.id, disposed = count, "Scope disposed");
    }

    /// Run a registration's factory and take ownership of its disposal
    fn activate<T: ?Sized>(&self, registration: &Registration<T>) -> Result<Arc<T>> {
        let activation = (registration.factory)(self)?;
        if let Some(disposable) = activation.disposable {
            match self.kind {
                ScopeKind::Root => self.provider.track_root_disposable(disposable),
                ScopeKind::Child => lock(&self.disposables).push(disposable),
            }
        }
        Ok(activation.service)
    }
}

fn unwrap_cached<T: ?Sized + Send + Sync + 'static>(
    cached: &CachedService,
    name: &'static str,
) -> Result<Arc<T>> {
    cached
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(|| Error::resolution(name, "cached instance has a different type"))
}

impl Drop for ServiceScope {
    fn drop(&mut self) {
        if self.kind == ScopeKind::Child && !self.is_disposed() {
            let pending = lock(&self.disposables).len();
            if pending > 0 {
                warn!(
                    scope = self.id,
                    pending, "Scope dropped without dispose; disposable services were not released"
                );
            }
        }
    }
}

impl fmt::Display for ServiceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ScopeKind::Root => write!(f, "root scope"),
            ScopeKind::Child => write!(f, "scope #{}", self.id),
        }
    }
}

impl fmt::Debug for ServiceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceScope")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("local_services", &self.local.len())
            .field("instances", &self.instances.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
