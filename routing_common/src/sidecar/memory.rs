use super::StateStore;
use crate::errors::StateStoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// **An in-process state store**
///
/// Stands in for the sidecar's store when running without one, and in tests.
/// Clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStateStore {
    data: Arc<RwLock<HashMap<(String, String), Value>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get_state(&self, store: &str, key: &str) -> Result<Option<Value>, StateStoreError> {
        let data = self.data.read().await;
        Ok(data.get(&(store.to_string(), key.to_string())).cloned())
    }

    async fn save_state(
        &self,
        store: &str,
        key: &str,
        value: Value,
    ) -> Result<(), StateStoreError> {
        let mut data = self.data.write().await;
        data.insert((store.to_string(), key.to_string()), value);
        Ok(())
    }
}
