use checkout_app::{context::AppContext, domain::baskets::Outcome};
use tokio_util::sync::CancellationToken;

use crate::cli::{basket::ItemsArgs, render};

pub(crate) async fn run(
    args: ItemsArgs,
    ctx: &AppContext,
    cancel: &CancellationToken,
) -> Outcome<String> {
    let client = args.client();

    Outcome::from(ctx.baskets.remove_items(client, args.delta(), cancel).await)
        .map(|basket| render::basket(&basket, ctx.currency))
}
