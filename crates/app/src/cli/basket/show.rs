use checkout_app::{context::AppContext, domain::baskets::Outcome};
use tokio_util::sync::CancellationToken;

use crate::cli::{basket::ClientArgs, render};

pub(crate) async fn run(
    args: &ClientArgs,
    ctx: &AppContext,
    cancel: &CancellationToken,
) -> Outcome<String> {
    Outcome::from(ctx.baskets.get_basket(args.client(), cancel).await).map(|basket| {
        if basket.is_empty() {
            format!("basket for client {} is empty", basket.client())
        } else {
            render::basket(&basket, ctx.currency)
        }
    })
}
