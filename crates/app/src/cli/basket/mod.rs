use checkout::basket::{BasketItems, ClientId};
use checkout_app::{context::AppContext, domain::baskets::Outcome};
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

mod add;
mod delete;
mod remove;
mod show;

#[derive(Debug, Args)]
pub(crate) struct BasketCommand {
    #[command(subcommand)]
    command: BasketSubcommand,
}

#[derive(Debug, Subcommand)]
enum BasketSubcommand {
    /// Add items to a client's basket
    Add(ItemsArgs),

    /// Remove items from a client's basket
    Remove(ItemsArgs),

    /// Show a client's basket
    Show(ClientArgs),

    /// Delete a client's basket
    Delete(ClientArgs),
}

#[derive(Debug, Args)]
pub(crate) struct ClientArgs {
    /// Client identity
    #[arg(long)]
    client: u64,
}

impl ClientArgs {
    fn client(&self) -> ClientId {
        ClientId::new(self.client)
    }
}

#[derive(Debug, Args)]
pub(crate) struct ItemsArgs {
    /// Client identity
    #[arg(long)]
    client: u64,

    /// Item and quantity as IDENTITY=QUANTITY; repeatable
    #[arg(long = "item", value_name = "IDENTITY=QUANTITY", value_parser = parse_item)]
    items: Vec<(String, u32)>,
}

impl ItemsArgs {
    fn client(&self) -> ClientId {
        ClientId::new(self.client)
    }

    /// Collapse repeated identities into one delta.
    fn delta(self) -> BasketItems {
        let mut delta = BasketItems::new();

        for (identity, quantity) in self.items {
            let total = delta
                .quantity(&identity)
                .unwrap_or(0)
                .saturating_add(quantity);

            delta.set(identity, total);
        }

        delta
    }
}

fn parse_item(value: &str) -> Result<(String, u32), String> {
    let (identity, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected IDENTITY=QUANTITY, got {value}"))?;

    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid quantity for {identity}: {error}"))?;

    Ok((identity.trim().to_string(), quantity))
}

pub(crate) async fn run(
    command: BasketCommand,
    ctx: &AppContext,
    cancel: &CancellationToken,
) -> Outcome<String> {
    match command.command {
        BasketSubcommand::Add(args) => add::run(args, ctx, cancel).await,
        BasketSubcommand::Remove(args) => remove::run(args, ctx, cancel).await,
        BasketSubcommand::Show(args) => show::run(&args, ctx, cancel).await,
        BasketSubcommand::Delete(args) => delete::run(&args, ctx, cancel).await,
    }
}
