//! Service provider
//!
//! Owns the class-level dill catalog and the singleton cache, and hands out
//! child scopes whose catalogs are chained onto it. Disposing the provider
//! releases every disposable singleton.

use super::collection::ServiceCollection;
use super::scope::{ScopeKind, ServiceScope};
use crate::constants::MAX_RESOLUTION_DEPTH;
use dashmap::DashMap;
use dill::{Catalog, CatalogBuilder};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tcv_domain::error::{Error, Result};
use tcv_domain::ports::Disposable;
use tracing::{debug, warn};

/// Cached instance; always holds an `Arc<T>` for the registered `T`
pub(crate) type CachedService = Arc<dyn Any + Send + Sync>;

/// Immutable resolver built from a [`ServiceCollection`]
///
/// Cloning is cheap and yields a handle to the same provider.
#[derive(Clone)]
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
}

pub(crate) struct ProviderInner {
    pub(crate) catalog: Arc<Catalog>,
    registered: HashMap<TypeId, &'static str>,
    singletons: DashMap<TypeId, CachedService>,
    root_disposables: Mutex<Vec<Arc<dyn Disposable>>>,
    disposed: AtomicBool,
    next_scope_id: AtomicU64,
    resolution_depth: AtomicUsize,
}

impl ServiceProvider {
    pub(crate) fn new(catalog: Catalog, registered: HashMap<TypeId, &'static str>) -> Self {
        debug!(services = registered.len(), "Built service catalog");
        Self {
            inner: Arc::new(ProviderInner {
                catalog: Arc::new(catalog),
                registered,
                singletons: DashMap::new(),
                root_disposables: Mutex::new(Vec::new()),
                disposed: AtomicBool::new(false),
                next_scope_id: AtomicU64::new(1),
                resolution_depth: AtomicUsize::new(0),
            }),
        }
    }

    /// Create a child scope for resolving scoped services
    pub fn create_scope(&self) -> Result<ServiceScope> {
        self.create_scope_with(ServiceCollection::new())
    }

    /// Create a child scope that also sees `extra` registrations
    ///
    /// The scope's catalog is chained onto the provider's. Registrations for
    /// types the provider already knows are ignored, so class-level
    /// registrations always win.
    pub fn create_scope_with(&self, extra: ServiceCollection) -> Result<ServiceScope> {
        if self.is_disposed() {
            return Err(Error::scope_disposed("service provider"));
        }
        let id = self.inner.next_scope_id.fetch_add(1, Ordering::SeqCst);

        let mut builder = CatalogBuilder::new_chained(&self.inner.catalog);
        let mut local = HashMap::new();
        for (key, staged) in extra.into_staged() {
            if self.inner.registered.contains_key(&key) {
                debug!(
                    scope = id,
                    service = staged.service_name,
                    "Class registration shadows scope registration"
                );
                continue;
            }
            staged.install(&mut builder);
            local.insert(key, staged.service_name);
        }

        Ok(ServiceScope::new(
            Arc::clone(&self.inner),
            Arc::new(builder.build()),
            local,
            ScopeKind::Child,
            id,
        ))
    }

    /// Check whether `T` is registered
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.inner.is_registered(TypeId::of::<T>())
    }

    /// Number of registrations
    pub fn service_count(&self) -> usize {
        self.inner.registered.len()
    }

    /// Whether [`ServiceProvider::dispose`] has run
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    /// Dispose singletons in reverse creation order
    ///
    /// Idempotent. Scopes created from this provider refuse further
    /// resolutions afterwards.
    pub async fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        let disposables = std::mem::take(&mut *lock(&self.inner.root_disposables));
        let count = disposables.len();
        for disposable in disposables.into_iter().rev() {
            if let Err(e) = disposable.dispose().await {
                warn!(error = %e, "Failed to dispose singleton service");
            }
        }
        self.inner.singletons.clear();
        debug!(disposed = count, "Service provider disposed");
    }
}

impl ProviderInner {
    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    pub(crate) fn is_registered(&self, key: TypeId) -> bool {
        self.registered.contains_key(&key)
    }

    pub(crate) fn track_root_disposable(&self, disposable: Arc<dyn Disposable>) {
        lock(&self.root_disposables).push(disposable);
    }

    pub(crate) fn cached_singleton(&self, key: TypeId) -> Option<CachedService> {
        self.singletons.get(&key).map(|entry| entry.value().clone())
    }

    /// Short-lived scope used to activate singletons; it cannot hold scoped services
    pub(crate) fn root_scope(self: &Arc<Self>) -> ServiceScope {
        ServiceScope::new(
            Arc::clone(self),
            Arc::clone(&self.catalog),
            HashMap::new(),
            ScopeKind::Root,
            0,
        )
    }

    pub(crate) fn cache_singleton(&self, key: TypeId, service: CachedService) -> CachedService {
        self.singletons.entry(key).or_insert(service).value().clone()
    }

    /// Enter one level of nested resolution
    pub(crate) fn enter_resolution(&self, service: &'static str) -> Result<DepthGuard<'_>> {
        let depth = self.resolution_depth.fetch_add(1, Ordering::SeqCst) + 1;
        let guard = DepthGuard {
            depth: &self.resolution_depth,
        };
        if depth > MAX_RESOLUTION_DEPTH {
            return Err(Error::resolution(
                service,
                format!("nested deeper than {MAX_RESOLUTION_DEPTH} levels, likely a cycle"),
            ));
        }
        Ok(guard)
    }
}

/// Decrements the resolution depth when dropped
pub(crate) struct DepthGuard<'a> {
    depth: &'a AtomicUsize,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("services", &self.service_count())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
