//! The "Routing Web Client CLI" app's entry point.

use routing_common::sidecar::{SidecarClient, SidecarConfig};
use routing_web_client_cli::logic::{parse_transaction, run};
use std::env;
use std::error::Error;
use tokio_util::sync::CancellationToken;

/// The "Routing Web Client CLI" app's entry point.
///
/// Usage: `routing_web_client_cli [id] [amount]`
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "routing=warn");
    }
    pretty_env_logger::init();

    let mut args = env::args().skip(1);
    let tx = parse_transaction(args.next(), args.next())?;

    let client = SidecarClient::new(SidecarConfig::from_env());

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    run(&client, &tx, &cancel).await?;

    Ok(())
}
