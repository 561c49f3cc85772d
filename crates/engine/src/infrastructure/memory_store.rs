//! In-memory key/value store for development and testing.
//!
//! Nothing is persisted; a restart starts every session over.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{KvStorePort, RepoError};

#[derive(Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl KvStorePort for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepoError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), RepoError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keys_are_isolated() {
        let store = InMemoryKvStore::new();
        store.put("a", "1".to_string()).await.expect("put");
        store.put("b", "2".to_string()).await.expect("put");
        store.put("a", "3".to_string()).await.expect("put");

        assert_eq!(store.get("a").await.expect("get"), Some("3".to_string()));
        assert_eq!(store.get("b").await.expect("get"), Some("2".to_string()));
        assert_eq!(store.get("c").await.expect("get"), None);
        assert_eq!(store.len().await, 2);
    }
}
