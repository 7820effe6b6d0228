//! The "Routing Web Service's" entry point.

use routing_common::accounts::Accounts;
use routing_common::constants::APP_TOKEN_ENV;
use routing_common::sidecar::{MemoryStateStore, SidecarClient, StateStore};
use routing_web_service::config::{ServiceConfig, StateBackend};
use routing_web_service::handlers::AppState;
use routing_web_service::routes::routes;
use std::env;
use std::error::Error;
use std::sync::Arc;

/// The "Routing Web Service's" entry point.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "routing=info");
    }
    pretty_env_logger::init();

    let config = ServiceConfig::from_env();

    if config.app_token.is_none() {
        log::warn!(
            "{} is not set; only calls without an app token will be accepted",
            APP_TOKEN_ENV
        );
    }

    let store: Arc<dyn StateStore> = match config.state_backend {
        StateBackend::Sidecar => {
            log::info!("State is kept by the sidecar at {}", config.sidecar.http_endpoint);
            Arc::new(SidecarClient::new(config.sidecar.clone()))
        }
        StateBackend::Memory => {
            log::info!("State is kept in memory");
            Arc::new(MemoryStateStore::new())
        }
    };

    let state = Arc::new(AppState::new(config.app_token.clone(), Accounts::new(store)));

    // Start up the server
    let (addr, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(config.listen_addr, async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Shutting down");
        })?;

    log::info!("Listening on http://{}", addr);
    server.await;

    Ok(())
}
