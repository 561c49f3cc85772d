//! Storage port traits.

use async_trait::async_trait;

use super::error::RepoError;

/// Durable string key/value store.
///
/// Values are opaque to the store; the game state repository owns the JSON
/// encoding. No compare-and-swap is offered, so concurrent writers to one
/// key resolve as last writer wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KvStorePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RepoError>;
    async fn put(&self, key: &str, value: String) -> Result<(), RepoError>;
}
