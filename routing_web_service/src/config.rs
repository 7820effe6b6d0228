//! Service configuration, read once at startup

use routing_common::constants::APP_TOKEN_ENV;
use routing_common::sidecar::SidecarConfig;
use std::net::{Ipv4Addr, SocketAddr};

pub const APP_PORT_ENV: &str = "APP_PORT";
pub const DEFAULT_APP_PORT: u16 = 5000;
pub const STATE_BACKEND_ENV: &str = "ROUTING_STATE_BACKEND";

/// **Where account records are kept**
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StateBackend {
    /// The sidecar's state store
    #[default]
    Sidecar,

    /// An in-process map, for running without a sidecar
    Memory,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    /// The token the sidecar must present in `dapr-api-token`.
    pub app_token: Option<String>,
    pub listen_addr: SocketAddr,
    pub state_backend: StateBackend,
    pub sidecar: SidecarConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// **Builds the configuration from a variable lookup**
    ///
    /// The app token is taken verbatim; an empty value is still a token.
    /// Malformed values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(APP_PORT_ENV) {
            Some(port) => port.trim().parse::<u16>().unwrap_or_else(|_| {
                log::warn!(
                    "{} could not be parsed: \"{}\"; using default: {}",
                    APP_PORT_ENV,
                    port,
                    DEFAULT_APP_PORT
                );
                DEFAULT_APP_PORT
            }),
            None => DEFAULT_APP_PORT,
        };

        let state_backend = match lookup(STATE_BACKEND_ENV).as_deref().map(str::trim) {
            None | Some("sidecar") => StateBackend::Sidecar,
            Some("memory") => StateBackend::Memory,
            Some(other) => {
                log::warn!(
                    "{} must be \"sidecar\" or \"memory\", not \"{}\"; using the sidecar",
                    STATE_BACKEND_ENV,
                    other
                );
                StateBackend::Sidecar
            }
        };

        Self {
            app_token: lookup(APP_TOKEN_ENV),
            listen_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, port)),
            state_backend,
            sidecar: SidecarConfig::from_lookup(&lookup),
        }
    }
}
