//! Scoped resource disposal port

use crate::error::Result;
use async_trait::async_trait;

/// A service holding resources that must be released when its owning scope ends
///
/// Services registered as disposable are released in reverse creation order
/// when the scope that created them (or, for singletons, the provider) is
/// disposed.
#[async_trait]
pub trait Disposable: Send + Sync {
    /// Release the resources held by this service
    async fn dispose(&self) -> Result<()>;
}
