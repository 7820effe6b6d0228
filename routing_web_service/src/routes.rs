//! The service's warp filters

use crate::errors::handle_rejection;
use crate::handlers::{self, AppState};
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

/// Upper bound on a request body
pub const BODY_LIMIT: u64 = 1024 * 16;

/// **All routes, with rejections mapped to status codes and requests logged**
///
/// - POST /deposit
/// - GET /dapr/subscribe
pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let log = warp::log("routing");

    let app_state = warp::any().map(move || state.clone());

    let deposit = warp::path!("deposit")
        .and(warp::post())
        .and(warp::header::headers_cloned())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::bytes())
        .and(app_state.clone())
        .and_then(handlers::deposit);

    let subscribe = warp::path!("dapr" / "subscribe")
        .and(warp::get())
        .and_then(handlers::subscribe);

    deposit.or(subscribe).recover(handle_rejection).with(log)
}
