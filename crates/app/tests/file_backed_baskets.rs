//! End-to-end basket updates against the kata fixture set and a state file.

use std::{path::Path, sync::Arc};

use checkout::{
    basket::{BasketItems, ClientId, TotalCost},
    pricing::UnknownItemPolicy,
};
use checkout_app::{
    context::{AppContext, AppInitError},
    domain::baskets::{BasketsServiceError, Outcome},
};
use testresult::TestResult;
use tokio_util::sync::CancellationToken;

const FIXTURES: &str = "../core/fixtures";

async fn context(state_file: &Path, policy: UnknownItemPolicy) -> Result<AppContext, AppInitError> {
    AppContext::from_fixture_set(Path::new(FIXTURES), "kata", state_file, policy).await
}

#[tokio::test]
async fn baskets_persist_across_contexts() -> TestResult {
    let dir = tempfile::tempdir()?;
    let state_file = dir.path().join("state.yml");
    let cancel = CancellationToken::new();
    let client = ClientId::new(11);

    let first = context(&state_file, UnknownItemPolicy::Ignore).await?;

    first
        .baskets
        .add_items(client, BasketItems::from([("Apple", 4), ("Coffee", 2)]), &cancel)
        .await?;

    let second = context(&state_file, UnknownItemPolicy::Ignore).await?;

    let basket = second
        .baskets
        .add_items(client, BasketItems::from([("Apple", 2), ("Bread", 2)]), &cancel)
        .await?;

    // Apple: 2 * 130, Coffee: 800, Bread: 240 - 20
    assert_eq!(basket.items().quantity("Apple"), Some(6));
    assert_eq!(basket.total_cost().map(TotalCost::to_minor), Some(260 + 800 + 220));

    let reloaded = context(&state_file, UnknownItemPolicy::Ignore)
        .await?
        .baskets
        .get_basket(client, &cancel)
        .await?;

    assert_eq!(reloaded, basket);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn contexts_sharing_a_state_file_do_not_lose_updates() -> TestResult {
    let dir = tempfile::tempdir()?;
    let state_file = dir.path().join("state.yml");
    let client = ClientId::new(21);
    let first = Arc::new(context(&state_file, UnknownItemPolicy::Ignore).await?);
    let second = Arc::new(context(&state_file, UnknownItemPolicy::Ignore).await?);

    let tasks: Vec<_> = (0..40)
        .map(|n| {
            let context = Arc::clone(if n % 2 == 0 { &first } else { &second });

            tokio::spawn(async move {
                context
                    .baskets
                    .add_items(client, BasketItems::from([("Milk", 1)]), &CancellationToken::new())
                    .await
            })
        })
        .collect();

    for task in tasks {
        task.await??;
    }

    let basket = context(&state_file, UnknownItemPolicy::Ignore)
        .await?
        .baskets
        .get_basket(client, &CancellationToken::new())
        .await?;

    assert_eq!(basket.items().quantity("Milk"), Some(40));
    assert_eq!(basket.total_cost().map(TotalCost::to_minor), Some(40 * 90));

    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_empty_not_a_failure() -> TestResult {
    let dir = tempfile::tempdir()?;
    let ctx = context(&dir.path().join("state.yml"), UnknownItemPolicy::Ignore).await?;
    let cancel = CancellationToken::new();
    let client = ClientId::new(5);

    ctx.baskets
        .add_items(client, BasketItems::from([("Milk", 1)]), &cancel)
        .await?;
    ctx.baskets.delete_basket(client, &cancel).await?;

    let outcome = Outcome::from(ctx.baskets.get_basket(client, &cancel).await);

    assert!(outcome.is_success());
    assert!(outcome.value().is_some_and(|basket| basket.is_empty()));

    Ok(())
}

#[tokio::test]
async fn empty_delta_is_a_safe_failure() -> TestResult {
    let dir = tempfile::tempdir()?;
    let ctx = context(&dir.path().join("state.yml"), UnknownItemPolicy::Ignore).await?;

    let outcome = Outcome::from(
        ctx.baskets
            .add_items(ClientId::new(1), BasketItems::new(), &CancellationToken::new())
            .await,
    );

    assert_eq!(
        outcome,
        Outcome::Failure {
            message: "Failed to update basket, did the request contain any items?".to_string()
        }
    );

    Ok(())
}

#[tokio::test]
async fn unknown_items_follow_the_configured_policy() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cancel = CancellationToken::new();
    let delta = BasketItems::from([("Apple", 1), ("Durian", 2)]);

    let lenient = context(&dir.path().join("lenient.yml"), UnknownItemPolicy::Ignore).await?;
    let basket = lenient
        .baskets
        .add_items(ClientId::new(1), delta.clone(), &cancel)
        .await?;

    assert_eq!(basket.total_cost().map(TotalCost::to_minor), Some(50));

    let strict = context(&dir.path().join("strict.yml"), UnknownItemPolicy::Reject).await?;
    let result = strict
        .baskets
        .add_items(ClientId::new(1), delta, &cancel)
        .await;

    assert!(matches!(
        result,
        Err(BasketsServiceError::UnknownCatalogItem(identity)) if identity == "Durian"
    ));

    Ok(())
}

#[tokio::test]
async fn cancelled_requests_report_cancelled() -> TestResult {
    let dir = tempfile::tempdir()?;
    let ctx = context(&dir.path().join("state.yml"), UnknownItemPolicy::Ignore).await?;
    let cancel = CancellationToken::new();

    cancel.cancel();

    let outcome = Outcome::from(
        ctx.baskets
            .add_items(ClientId::new(1), BasketItems::from([("Apple", 1)]), &cancel)
            .await,
    );

    assert_eq!(outcome, Outcome::Cancelled);

    Ok(())
}

#[tokio::test]
async fn corrupt_state_file_fails_startup() -> TestResult {
    let dir = tempfile::tempdir()?;
    let state_file = dir.path().join("state.yml");

    std::fs::write(&state_file, "baskets: {")?;

    let result = context(&state_file, UnknownItemPolicy::Ignore).await;

    assert!(matches!(result, Err(AppInitError::Store(_))));

    Ok(())
}
