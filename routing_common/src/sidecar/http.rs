//! The sidecar's HTTP API, spoken with `reqwest`
//!
//! - state get:  `GET  {endpoint}/v1.0/state/{store}/{key}`
//! - state save: `POST {endpoint}/v1.0/state/{store}` with `[{"key": .., "value": ..}]`
//! - invoke:     `POST {endpoint}/v1.0/invoke/{app_id}/method/{method}`
//!
//! Every call is a single attempt.

use super::{ServiceInvoker, SidecarConfig, StateStore};
use crate::constants::{SIDECAR_API_TOKEN_HEADER, SIDECAR_API_VERSION};
use crate::errors::{InvocationError, StateStoreError};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct StateItem<'a> {
    key: &'a str,
    value: Value,
}

/// **A client for the local sidecar**
///
/// Implements both [`StateStore`] and [`ServiceInvoker`].
#[derive(Clone, Debug)]
pub struct SidecarClient {
    client: Client,
    config: SidecarConfig,
}

impl SidecarClient {
    pub fn new(config: SidecarConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Appends percent-encoded path segments to the configured endpoint.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.config.http_endpoint.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push(SIDECAR_API_VERSION)
                .extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.client.request(method, url);
        match &self.config.api_token {
            Some(token) => request.header(SIDECAR_API_TOKEN_HEADER, token),
            None => request,
        }
    }
}

/// Reads the body of a non-success response, for the error message.
async fn failure_body(response: Response) -> String {
    response.text().await.unwrap_or_default()
}

#[async_trait]
impl StateStore for SidecarClient {
    async fn get_state(&self, store: &str, key: &str) -> Result<Option<Value>, StateStoreError> {
        let url = self.url(&["state", store, key]);
        log::debug!("get_state; url = {}", url);

        let response = self.request(Method::GET, url).send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            let body = failure_body(response).await;
            return Err(StateStoreError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| StateStoreError::Serialisation(err.to_string()))
    }

    async fn save_state(
        &self,
        store: &str,
        key: &str,
        value: Value,
    ) -> Result<(), StateStoreError> {
        let url = self.url(&["state", store]);
        log::debug!("save_state; url = {}, key = {}", url, key);

        let response = self
            .request(Method::POST, url)
            .json(&[StateItem { key, value }])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = failure_body(response).await;
            Err(StateStoreError::Status { status, body })
        }
    }
}

#[async_trait]
impl ServiceInvoker for SidecarClient {
    async fn invoke_method(
        &self,
        app_id: &str,
        method: &str,
        body: Value,
    ) -> Result<Value, InvocationError> {
        let url = self.url(&["invoke", app_id, "method", method]);
        log::debug!("invoke_method; url = {}", url);

        let response = self
            .request(Method::POST, url)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = failure_body(response).await;
            return Err(InvocationError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| InvocationError::Serialisation(err.to_string()))
    }
}
