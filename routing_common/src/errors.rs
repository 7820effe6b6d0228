use rust_decimal::Decimal;
use thiserror::Error;

pub use reqwest::StatusCode;

/// **Failures talking to the state store**
#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("State store responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Serialisation error: {0}")]
    Serialisation(String),
}

/// **Failures invoking a method on another service**
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Remote method responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Serialisation error: {0}")]
    Serialisation(String),

    #[error("Invocation cancelled")]
    Cancelled,
}

/// **Everything a deposit can fail with**
///
/// `Unauthorized` and `InvalidAmount` are the modeled rejections.
/// The remaining variants are faults that are not recovered from.
#[derive(Debug, Error)]
pub enum DepositError {
    #[error("Unauthorized call rejected")]
    Unauthorized,

    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Account \"{0}\" would be over-funded by {1}")]
    AccountOverFunded(String, Decimal),

    #[error("Malformed transaction: {0}")]
    MalformedTransaction(#[from] serde_json::Error),

    #[error(transparent)]
    State(#[from] StateStoreError),
}

impl DepositError {
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            DepositError::AccountOverFunded(..)
                | DepositError::MalformedTransaction(_)
                | DepositError::State(_)
        )
    }
}

impl From<reqwest::Error> for StateStoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StateStoreError::Serialisation(err.to_string())
        } else {
            StateStoreError::Connection(err.to_string())
        }
    }
}

impl From<reqwest::Error> for InvocationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            InvocationError::Serialisation(err.to_string())
        } else {
            InvocationError::Connection(err.to_string())
        }
    }
}
