use crate::constants::{
    DEFAULT_SIDECAR_HTTP_PORT, SIDECAR_API_TOKEN_ENV, SIDECAR_HTTP_ENDPOINT_ENV,
    SIDECAR_HTTP_PORT_ENV,
};
use reqwest::Url;

/// **Where the sidecar's HTTP API lives, and how to authenticate to it**
#[derive(Clone, Debug, PartialEq)]
pub struct SidecarConfig {
    pub http_endpoint: Url,

    /// Sent as `dapr-api-token` on every call to the sidecar, when set.
    pub api_token: Option<String>,
}

impl SidecarConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// **Builds the configuration from a variable lookup**
    ///
    /// - An explicit endpoint wins over the port.
    /// - A malformed endpoint or port falls back to the local default.
    /// - An empty API token is treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_endpoint = match lookup(SIDECAR_HTTP_ENDPOINT_ENV) {
            Some(endpoint) => parse_endpoint(&endpoint).unwrap_or_else(|| {
                log::warn!(
                    "{} could not be parsed: \"{}\"; using the local sidecar",
                    SIDECAR_HTTP_ENDPOINT_ENV,
                    endpoint
                );
                local_endpoint(port_from(&lookup))
            }),
            None => local_endpoint(port_from(&lookup)),
        };

        let api_token = lookup(SIDECAR_API_TOKEN_ENV).filter(|token| !token.is_empty());

        Self {
            http_endpoint,
            api_token,
        }
    }
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            http_endpoint: local_endpoint(DEFAULT_SIDECAR_HTTP_PORT),
            api_token: None,
        }
    }
}

fn port_from<F>(lookup: &F) -> u16
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(SIDECAR_HTTP_PORT_ENV) {
        Some(port) => port.trim().parse::<u16>().unwrap_or_else(|_| {
            log::warn!(
                "{} could not be parsed: \"{}\"; using default: {}",
                SIDECAR_HTTP_PORT_ENV,
                port,
                DEFAULT_SIDECAR_HTTP_PORT
            );
            DEFAULT_SIDECAR_HTTP_PORT
        }),
        None => DEFAULT_SIDECAR_HTTP_PORT,
    }
}

/// Only `http` and `https` URLs that can carry a path are usable.
fn parse_endpoint(endpoint: &str) -> Option<Url> {
    let url = Url::parse(endpoint.trim()).ok()?;
    let usable = matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base();
    usable.then_some(url)
}

fn local_endpoint(port: u16) -> Url {
    Url::parse(&format!("http://127.0.0.1:{port}")).expect("A loopback URL is always valid.")
}
