use crate::{DEFAULT_AMOUNT, DEFAULT_ID};
use routing_common::constants::{DEPOSIT_METHOD, TARGET_APP_ID};
use routing_common::errors::InvocationError;
use routing_common::sidecar::{ServiceInvoker, ServiceInvokerExt};
use routing_common::types::{Account, Transaction};
use rust_decimal::Decimal;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;

/// **Builds the transaction to send**
///
/// Both arguments are optional and positional:
/// - `id` defaults to [`DEFAULT_ID`];
/// - `amount` defaults to [`DEFAULT_AMOUNT`].
///
/// A negative amount is sent as-is; the service is the one to reject it.
///
/// # Errors
/// - The amount isn't a decimal number, `rust_decimal::Error`.
pub fn parse_transaction(
    id: Option<String>,
    amount: Option<String>,
) -> Result<Transaction, rust_decimal::Error> {
    let id = id.unwrap_or_else(|| DEFAULT_ID.to_string());
    let amount = amount.unwrap_or_else(|| DEFAULT_AMOUNT.to_string());

    let amount = Decimal::from_str(amount.trim()).map_err(|err| {
        eprintln!(
            "[ERROR] Only decimal numbers are allowed as the amount; you provided '{}'.",
            amount
        );
        err
    })?;

    Ok(Transaction::new(id, amount))
}

/// **Invokes `deposit` on the `routing` app**
///
/// A single attempt; retrying is left to whoever calls this.
///
/// # Errors
/// - `cancel` fired before the call completed, `InvocationError::Cancelled`;
/// - The sidecar couldn't route the call, `InvocationError::Connection`;
/// - The remote method answered with a non-success status, `InvocationError::Status`.
pub async fn invoke_deposit<I>(
    invoker: &I,
    tx: &Transaction,
    cancel: &CancellationToken,
) -> Result<Account, InvocationError>
where
    I: ServiceInvoker + ?Sized,
{
    log::debug!("invoke_deposit; tx = {:?}", tx);

    let invocation = async {
        let result: Result<Account, InvocationError> =
            invoker.invoke_json(TARGET_APP_ID, DEPOSIT_METHOD, tx).await;
        result
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(InvocationError::Cancelled),
        result = invocation => result,
    }
}

/// Invokes the deposit and prints the returned account.
pub async fn run<I>(
    invoker: &I,
    tx: &Transaction,
    cancel: &CancellationToken,
) -> Result<Account, InvocationError>
where
    I: ServiceInvoker + ?Sized,
{
    println!("Invoking deposit");
    let account = invoke_deposit(invoker, tx, cancel).await?;
    println!("{}", returned(&account));
    Ok(account)
}

fn returned(account: &Account) -> String {
    format!("Returned: id:{} | Balance:{}", account.id, account.balance)
}
