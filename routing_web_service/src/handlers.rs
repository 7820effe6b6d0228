//! Handler functions

use crate::errors::reject;
use routing_common::accounts::Accounts;
use routing_common::constants::APP_TOKEN_HEADER;
use routing_common::errors::DepositError;
use routing_common::types::Transaction;
use routing_common::validation;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::HeaderMap;
use warp::hyper::body::Bytes;
use warp::{Rejection, Reply};

/// What every request handler shares
pub struct AppState {
    /// The token callers must present; see [`validation::authorize`].
    pub app_token: Option<String>,
    pub accounts: Accounts,
}

impl AppState {
    pub fn new(app_token: Option<String>, accounts: Accounts) -> Self {
        Self {
            app_token,
            accounts,
        }
    }
}

/// The `deposit` handler
///
/// Authenticates the caller before looking at the body, so a bad token is
/// rejected whatever the body holds. The token header is compared as raw bytes.
///
/// Responds with the updated account.
///
/// POST /deposit
pub async fn deposit(
    headers: HeaderMap,
    body: Bytes,
    state: Arc<AppState>,
) -> Result<impl Reply, Rejection> {
    let token = headers.get(APP_TOKEN_HEADER).map(|value| value.as_bytes());
    validation::authorize(state.app_token.as_deref(), token).map_err(reject)?;

    log::info!("Enter Deposit");

    let tx: Transaction = serde_json::from_slice(&body)
        .map_err(DepositError::from)
        .map_err(reject)?;

    log::info!("Id is {}, Amount is {}", tx.id, tx.amount);

    let account = state.accounts.deposit(&tx).await.map_err(reject)?;

    log::info!("Balance is {}", account.balance);

    Ok(warp::reply::json(&account))
}

/// The `subscribe` handler
///
/// The sidecar asks for the app's pub/sub subscriptions at startup; this app has none.
///
/// GET /dapr/subscribe
pub async fn subscribe() -> Result<impl Reply, Infallible> {
    log::debug!("subscribe");
    Ok(warp::reply::json(&json!([])))
}
