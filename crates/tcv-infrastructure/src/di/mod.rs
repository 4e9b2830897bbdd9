//! Service Container
//!
//! Registrations are staged in a [`ServiceCollection`], where a later
//! registration for the same type replaces the earlier one, and then frozen
//! into a dill [`Catalog`](dill::Catalog). Each test class gets its own
//! catalog; each test case gets a child catalog chained onto it.
//!
//! ## Architecture
//!
//! ```text
//! ServiceCollection (staged registrations, last one wins)
//!        │ build()
//!        ▼
//! ServiceProvider (dill Catalog + singleton cache)      ← one per test class
//!        │ create_scope() / create_scope_with(extra)
//!        ▼
//! ServiceScope (chained Catalog + scoped cache)         ← one per test method
//!        │ dispose()
//!        ▼
//! disposables released in reverse creation order
//! ```
//!
//! ## Lifetimes
//!
//! | Lifetime | Instances |
//! |----------|-----------|
//! | Singleton | One per provider, disposed with the provider |
//! | Scoped | One per scope, disposed with the scope |
//! | Transient | New on every resolution, disposed with the resolving scope |
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use tcv_infrastructure::di::ServiceCollection;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! let mut services = ServiceCollection::new();
//! services.add_scoped::<dyn Greeter, _>(|_| Ok(Arc::new(English) as Arc<dyn Greeter>));
//!
//! let provider = services.build();
//! let scope = provider.create_scope().unwrap();
//! assert_eq!(scope.resolve::<dyn Greeter>().unwrap().greet(), "hello");
//! ```

pub mod collection;
pub mod provider;
pub mod scope;

pub use collection::{ServiceCollection, ServiceLifetime};
pub use provider::ServiceProvider;
pub use scope::ServiceScope;
