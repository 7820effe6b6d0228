//! The narrow surface of the sidecar this app relies on
//!
//! Two capabilities are used: a keyed state store and service-to-service method
//! invocation. Both move JSON values; the `*Ext` traits add typed helpers on top.

mod config;
mod http;
mod memory;

pub use config::SidecarConfig;
pub use http::SidecarClient;
pub use memory::MemoryStateStore;

use crate::errors::{InvocationError, StateStoreError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A key-value store reached through the sidecar.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// `None` when nothing is stored under `key`.
    async fn get_state(&self, store: &str, key: &str) -> Result<Option<Value>, StateStoreError>;

    async fn save_state(&self, store: &str, key: &str, value: Value)
        -> Result<(), StateStoreError>;
}

/// Invokes a named method on another app, addressed by its app id.
#[async_trait]
pub trait ServiceInvoker: Send + Sync {
    async fn invoke_method(
        &self,
        app_id: &str,
        method: &str,
        body: Value,
    ) -> Result<Value, InvocationError>;
}

#[async_trait]
pub trait StateStoreExt: StateStore {
    async fn get_json<T>(&self, store: &str, key: &str) -> Result<Option<T>, StateStoreError>
    where
        T: DeserializeOwned + Send,
    {
        match self.get_state(store, key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|err| StateStoreError::Serialisation(err.to_string())),
            None => Ok(None),
        }
    }

    async fn save_json<T>(&self, store: &str, key: &str, value: &T) -> Result<(), StateStoreError>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(value)
            .map_err(|err| StateStoreError::Serialisation(err.to_string()))?;
        self.save_state(store, key, value).await
    }
}

impl<S: StateStore + ?Sized> StateStoreExt for S {}

#[async_trait]
pub trait ServiceInvokerExt: ServiceInvoker {
    async fn invoke_json<Req, Resp>(
        &self,
        app_id: &str,
        method: &str,
        body: &Req,
    ) -> Result<Resp, InvocationError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned + Send,
    {
        let body = serde_json::to_value(body)
            .map_err(|err| InvocationError::Serialisation(err.to_string()))?;
        let response = self.invoke_method(app_id, method, body).await?;
        serde_json::from_value(response)
            .map_err(|err| InvocationError::Serialisation(err.to_string()))
    }
}

impl<I: ServiceInvoker + ?Sized> ServiceInvokerExt for I {}
