use routing_common::errors::DepositError;
use warp::http::StatusCode;
use warp::reject::Reject;
use warp::{Rejection, Reply};

#[derive(Debug)]
pub struct WebServiceDepositError(pub DepositError);

impl Reject for WebServiceDepositError {}

pub fn reject(err: DepositError) -> Rejection {
    warp::reject::custom(WebServiceDepositError(err))
}

/// **Turns deposit rejections into status codes**
///
/// - `Unauthorized` is 401, a negative amount is 400.
/// - Every other failure is an opaque 500.
///
/// Rejections that don't come from a deposit are passed on to warp.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    match err.find::<WebServiceDepositError>() {
        Some(WebServiceDepositError(deposit_err)) => Ok(warp::reply::with_status(
            warp::reply(),
            status_for(deposit_err),
        )),
        None => Err(err),
    }
}

fn status_for(err: &DepositError) -> StatusCode {
    match err {
        DepositError::Unauthorized => {
            log::info!("Unauthorized call rejected");
            StatusCode::UNAUTHORIZED
        }
        DepositError::InvalidAmount(amount) => {
            log::info!("Invalid amount: {}", amount);
            StatusCode::BAD_REQUEST
        }
        fault => {
            log::error!("Deposit failed: {}", fault);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
