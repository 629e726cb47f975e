use checkout_app::{context::AppContext, domain::baskets::Outcome};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::config::{LoggingConfig, StoreConfig};

mod basket;
mod render;

#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Checkout basket CLI", long_about = None)]
pub(crate) struct Cli {
    /// Fixture, state file and pricing settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Basket(basket::BasketCommand),
}

impl Cli {
    /// Parse arguments, reading a `.env` file first if one exists.
    pub(crate) fn load() -> Self {
        _ = dotenvy::dotenv();

        Self::parse()
    }

    pub(crate) async fn run(self, ctx: &AppContext, cancel: &CancellationToken) -> Outcome<String> {
        match self.command {
            Commands::Basket(command) => basket::run(command, ctx, cancel).await,
        }
    }
}
