//! Checkout CLI

use std::process::ExitCode;

use checkout_app::{context::AppContext, domain::baskets::Outcome, errors::error_chain};
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

mod cli;
mod config;
mod observability;
mod shutdown;

#[tokio::main]
pub async fn main() -> ExitCode {
    let cli = cli::Cli::load();

    if let Err(error) = observability::init(&cli.logging) {
        eprintln!("{}", error_chain(&error));
        return ExitCode::FAILURE;
    }

    let ctx = match AppContext::from_fixture_set(
        &cli.store.fixtures_dir,
        &cli.store.fixture_set,
        &cli.store.state_file,
        cli.store.unknown_items.into(),
    )
    .await
    {
        Ok(ctx) => ctx,
        Err(error) => {
            error!("failed to initialise: {}", error_chain(&error));
            eprintln!("{}", error_chain(&error));
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    let timeout = cli.store.timeout();

    let signals = tokio::spawn({
        let cancel = cancel.clone();

        async move {
            if let Err(error) = shutdown::cancel_on_signal(&cancel, timeout).await {
                warn!("{error}");
            }
        }
    });

    let outcome = cli.run(&ctx, &cancel).await;

    signals.abort();

    match outcome {
        Outcome::Success(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Outcome::Failure { message } => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        Outcome::Cancelled => {
            eprintln!("cancelled");
            ExitCode::from(130)
        }
    }
}
