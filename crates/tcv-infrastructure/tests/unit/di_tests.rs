//! Service container tests
//!
//! Validate lifetimes, overrides, constructor injection, chained scope
//! catalogs and deterministic disposal of the service container.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tcv_domain::error::{Error, Result};
use tcv_domain::ports::Disposable;
use tcv_infrastructure::di::{ServiceCollection, ServiceLifetime};

trait MessageService: Send + Sync {
    fn message(&self) -> String;
}

#[derive(Debug)]
struct RealService;

impl MessageService for RealService {
    fn message(&self) -> String {
        "Real Implementation".to_string()
    }
}

#[derive(Debug)]
struct MockService;

impl MessageService for MockService {
    fn message(&self) -> String {
        "Mock Implementation".to_string()
    }
}

/// Shared log of disposal events
#[derive(Default)]
struct DisposalLog(Mutex<Vec<String>>);

impl DisposalLog {
    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

struct Connection {
    name: &'static str,
    log: Arc<DisposalLog>,
}

#[async_trait]
impl Disposable for Connection {
    async fn dispose(&self) -> Result<()> {
        self.log.0.lock().unwrap().push(self.name.to_string());
        Ok(())
    }
}

struct Repository {
    connection: Arc<Connection>,
}

#[test]
fn test_scoped_instances_are_shared_within_scope_only() {
    let mut services = ServiceCollection::new();
    services.add_scoped::<RealService, _>(|_| Ok(Arc::new(RealService)));
    let provider = services.build();

    let first = provider.create_scope().unwrap();
    let second = provider.create_scope().unwrap();

    let a = first.resolve::<RealService>().unwrap();
    let b = first.resolve::<RealService>().unwrap();
    let c = second.resolve::<RealService>().unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
}

#[test]
fn test_singleton_is_shared_across_scopes() {
    let mut services = ServiceCollection::new();
    services.add_singleton::<RealService, _>(|_| Ok(Arc::new(RealService)));
    let provider = services.build();

    let a = provider.create_scope().unwrap().resolve::<RealService>().unwrap();
    let b = provider.create_scope().unwrap().resolve::<RealService>().unwrap();

    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_transient_is_created_every_time() {
    let mut services = ServiceCollection::new();
    services.add_transient::<RealService, _>(|_| Ok(Arc::new(RealService)));
    let scope = services.build().create_scope().unwrap();

    let a = scope.resolve::<RealService>().unwrap();
    let b = scope.resolve::<RealService>().unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn test_later_registration_overrides_earlier() {
    let mut services = ServiceCollection::new();
    services.add_scoped::<dyn MessageService, _>(|_| {
        Ok(Arc::new(RealService) as Arc<dyn MessageService>)
    });
    services.add_scoped::<dyn MessageService, _>(|_| {
        Ok(Arc::new(MockService) as Arc<dyn MessageService>)
    });

    assert_eq!(services.len(), 1);
    let scope = services.build().create_scope().unwrap();
    let service = scope.resolve::<dyn MessageService>().unwrap();
    assert_eq!(service.message(), "Mock Implementation");
}

#[test]
fn test_instance_registration() {
    let mut services = ServiceCollection::new();
    let instance: Arc<dyn MessageService> = Arc::new(RealService);
    services.add_instance(Arc::clone(&instance));

    assert_eq!(
        services.lifetime_of::<dyn MessageService>(),
        Some(ServiceLifetime::Singleton)
    );
    let resolved = services
        .build()
        .create_scope()
        .unwrap()
        .resolve::<dyn MessageService>()
        .unwrap();
    assert!(Arc::ptr_eq(&resolved, &instance));
}

#[test]
fn test_unregistered_service_fails() {
    let scope = ServiceCollection::new().build().create_scope().unwrap();

    let err = scope.resolve::<RealService>().unwrap_err();
    assert!(matches!(err, Error::ServiceNotRegistered { .. }));
    assert!(scope.try_resolve::<RealService>().unwrap().is_none());
}

#[test]
fn test_constructor_injection_shares_scoped_dependency() {
    let log = Arc::new(DisposalLog::default());
    let mut services = ServiceCollection::new();
    services.add_instance(Arc::clone(&log));
    services.add_scoped_disposable::<Connection, _>(|scope| {
        Ok(Arc::new(Connection {
            name: "connection",
            log: scope.resolve::<DisposalLog>()?,
        }))
    });
    services.add_scoped::<Repository, _>(|scope| {
        Ok(Arc::new(Repository {
            connection: scope.resolve::<Connection>()?,
        }))
    });

    let scope = services.build().create_scope().unwrap();
    let repository = scope.resolve::<Repository>().unwrap();
    let connection = scope.resolve::<Connection>().unwrap();

    assert!(Arc::ptr_eq(&repository.connection, &connection));
}

#[tokio::test]
async fn test_scope_disposes_in_reverse_creation_order() {
    let log = Arc::new(DisposalLog::default());
    let mut services = ServiceCollection::new();
    services.add_instance(Arc::clone(&log));
    services.add_scoped_disposable::<Connection, _>(|scope| {
        Ok(Arc::new(Connection {
            name: "scoped",
            log: scope.resolve::<DisposalLog>()?,
        }))
    });
    services.add_transient_disposable::<Repository, _>(|scope| {
        Ok(Arc::new(Repository {
            connection: Arc::new(Connection {
                name: "transient",
                log: scope.resolve::<DisposalLog>()?,
            }),
        }))
    });

    let provider = services.build();
    let scope = provider.create_scope().unwrap();
    scope.resolve::<Connection>().unwrap();
    scope.resolve::<Repository>().unwrap();

    assert!(log.entries().is_empty());
    scope.dispose().await;
    assert_eq!(log.entries(), vec!["transient", "scoped"]);

    // Disposal is idempotent
    scope.dispose().await;
    assert_eq!(log.entries().len(), 2);
}

#[async_trait]
impl Disposable for Repository {
    async fn dispose(&self) -> Result<()> {
        self.connection.dispose().await
    }
}

#[tokio::test]
async fn test_resolve_after_dispose_fails() {
    let mut services = ServiceCollection::new();
    services.add_scoped::<RealService, _>(|_| Ok(Arc::new(RealService)));
    let scope = services.build().create_scope().unwrap();

    scope.dispose().await;

    let err = scope.resolve::<RealService>().unwrap_err();
    assert!(matches!(err, Error::ScopeDisposed { .. }));
}

#[tokio::test]
async fn test_provider_disposes_singletons() {
    let log = Arc::new(DisposalLog::default());
    let mut services = ServiceCollection::new();
    services.add_instance(Arc::clone(&log));
    services.add_singleton_disposable::<Connection, _>(|scope| {
        Ok(Arc::new(Connection {
            name: "singleton",
            log: scope.resolve::<DisposalLog>()?,
        }))
    });
    let provider = services.build();

    let scope = provider.create_scope().unwrap();
    scope.resolve::<Connection>().unwrap();
    scope.dispose().await;
    assert!(log.entries().is_empty(), "singletons outlive case scopes");

    provider.dispose().await;
    assert_eq!(log.entries(), vec!["singleton"]);
    assert!(provider.is_disposed());
    assert!(provider.create_scope().is_err());
}

#[test]
fn test_self_referencing_registration_fails() {
    #[derive(Debug)]
    struct Node {
        _next: Arc<Node>,
    }

    let mut services = ServiceCollection::new();
    services.add_transient::<Node, _>(|scope| {
        Ok(Arc::new(Node {
            _next: scope.resolve::<Node>()?,
        }))
    });
    let scope = services.build().create_scope().unwrap();

    let err = scope.resolve::<Node>().unwrap_err();
    assert!(matches!(err, Error::Resolution { .. }));
}

#[test]
fn test_singleton_cannot_capture_scoped_service() {
    #[derive(Debug)]
    struct Cache {
        _service: Arc<RealService>,
    }

    let mut services = ServiceCollection::new();
    services.add_scoped::<RealService, _>(|_| Ok(Arc::new(RealService)));
    services.add_singleton::<Cache, _>(|scope| {
        Ok(Arc::new(Cache {
            _service: scope.resolve::<RealService>()?,
        }))
    });
    let scope = services.build().create_scope().unwrap();

    assert!(matches!(
        scope.resolve::<Cache>().unwrap_err(),
        Error::Resolution { .. }
    ));
}

#[test]
fn test_collection_introspection() {
    let mut services = ServiceCollection::new();
    assert!(services.is_empty());

    services.add_scoped::<RealService, _>(|_| Ok(Arc::new(RealService)));
    services.add_transient::<MockService, _>(|_| Ok(Arc::new(MockService)));

    assert!(services.contains::<RealService>());
    assert_eq!(
        services.lifetime_of::<MockService>(),
        Some(ServiceLifetime::Transient)
    );
    assert_eq!(services.service_names().len(), 2);

    assert!(services.remove::<MockService>());
    assert!(!services.contains::<MockService>());

    let provider = services.build();
    assert!(provider.is_registered::<RealService>());
    assert_eq!(provider.service_count(), 1);
}

#[derive(Debug, PartialEq, Eq)]
struct CaseName(&'static str);

#[test]
fn test_scope_registrations_are_visible_only_in_their_scope() {
    let mut services = ServiceCollection::new();
    services.add_scoped::<RealService, _>(|_| Ok(Arc::new(RealService)));
    let provider = services.build();

    let mut extra = ServiceCollection::new();
    extra.add_instance(Arc::new(CaseName("Adds")));
    let case_scope = provider.create_scope_with(extra).unwrap();
    let plain_scope = provider.create_scope().unwrap();

    assert_eq!(*case_scope.resolve::<CaseName>().unwrap(), CaseName("Adds"));
    assert!(case_scope.resolve::<RealService>().is_ok());
    assert!(!plain_scope.is_registered::<CaseName>());
    assert!(matches!(
        plain_scope.resolve::<CaseName>(),
        Err(Error::ServiceNotRegistered { .. })
    ));
    assert!(!provider.is_registered::<CaseName>());
}

#[test]
fn test_class_registration_wins_over_scope_registration() {
    let mut services = ServiceCollection::new();
    services.add_instance(Arc::new(CaseName("class")));
    let provider = services.build();

    let mut extra = ServiceCollection::new();
    extra.add_instance(Arc::new(CaseName("case")));
    let scope = provider.create_scope_with(extra).unwrap();

    assert_eq!(*scope.resolve::<CaseName>().unwrap(), CaseName("class"));
}

#[test]
fn test_scope_registered_singleton_is_shared_within_scope() {
    let provider = ServiceCollection::new().build();
    let mut extra = ServiceCollection::new();
    extra.add_singleton::<RealService, _>(|_| Ok(Arc::new(RealService)));
    let scope = provider.create_scope_with(extra).unwrap();

    let a = scope.resolve::<RealService>().unwrap();
    let b = scope.resolve::<RealService>().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}
