use checkout_app::{context::AppContext, domain::baskets::Outcome};
use tokio_util::sync::CancellationToken;

use crate::cli::basket::ClientArgs;

pub(crate) async fn run(
    args: &ClientArgs,
    ctx: &AppContext,
    cancel: &CancellationToken,
) -> Outcome<String> {
    let client = args.client();

    Outcome::from(ctx.baskets.delete_basket(client, cancel).await)
        .map(|()| format!("deleted basket for client {client}"))
}
