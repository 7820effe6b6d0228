/// State and invocation

pub const STORE_NAME: &str = "statestore";
pub const TARGET_APP_ID: &str = "routing";
pub const DEPOSIT_METHOD: &str = "deposit";

/// App token: the sidecar presents it on every call into the app

pub const APP_TOKEN_HEADER: &str = "dapr-api-token";
pub const APP_TOKEN_ENV: &str = "MY_APP_TOKEN";

/// Sidecar HTTP API

pub const SIDECAR_HTTP_ENDPOINT_ENV: &str = "DAPR_HTTP_ENDPOINT";
pub const SIDECAR_HTTP_PORT_ENV: &str = "DAPR_HTTP_PORT";
pub const SIDECAR_API_TOKEN_ENV: &str = "DAPR_API_TOKEN";
pub const SIDECAR_API_TOKEN_HEADER: &str = "dapr-api-token";
pub const DEFAULT_SIDECAR_HTTP_PORT: u16 = 3500;
pub const SIDECAR_API_VERSION: &str = "v1.0";
