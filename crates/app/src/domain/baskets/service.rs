//! Baskets service.
//!
//! Every update runs under its client's lock and the store's lease for that
//! client: read the stored basket, merge the delta, then store the merged
//! basket unpriced while pricing it. Only once both halves succeed is the
//! priced basket written back and returned. Any failure after the first write
//! restores the previous basket; if even that fails, the unpriced record is
//! repriced when next read.

use std::{fmt, panic::AssertUnwindSafe, sync::Arc};

use async_trait::async_trait;
use checkout::{
    basket::{Basket, BasketItems, ClientId},
    merge::{self, MergeError},
};
use futures::FutureExt;
use mockall::automock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::{
    domain::{
        baskets::{BasketsServiceError, errors::StoreOperation, locks::ClientLocks},
        pricing::CostCalculator,
    },
    errors::error_chain,
    sources::BasketStore,
};

#[derive(Clone)]
pub struct BasketOrchestrator {
    store: Arc<dyn BasketStore>,
    calculator: CostCalculator,
    locks: Arc<ClientLocks>,
}

impl fmt::Debug for BasketOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasketOrchestrator")
            .field("calculator", &self.calculator)
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
enum Change<'a> {
    Add(&'a BasketItems),
    Remove(&'a BasketItems),
}

impl Change<'_> {
    const fn operation(self) -> &'static str {
        match self {
            Self::Add(_) => "add_items",
            Self::Remove(_) => "remove_items",
        }
    }

    fn apply(self, existing: &Basket) -> Result<Basket, MergeError> {
        match self {
            Self::Add(delta) => merge::add_items(existing, delta),
            Self::Remove(delta) => Ok(merge::remove_items(existing, delta)),
        }
    }
}

impl BasketOrchestrator {
    #[must_use]
    pub fn new(store: Arc<dyn BasketStore>, calculator: CostCalculator) -> Self {
        Self {
            store,
            calculator,
            locks: Arc::new(ClientLocks::new()),
        }
    }

    /// Run `operation`, turning cancellation and panics into errors.
    async fn guarded<T, F>(
        operation: &'static str,
        client: ClientId,
        cancel: &CancellationToken,
        future: F,
    ) -> Result<T, BasketsServiceError>
    where
        F: Future<Output = Result<T, BasketsServiceError>> + Send,
    {
        if cancel.is_cancelled() {
            return Err(BasketsServiceError::Cancelled);
        }

        let result = AssertUnwindSafe(future)
            .catch_unwind()
            .await
            .unwrap_or_else(|_panic| {
                error!(operation, %client, "basket operation panicked");

                Err(BasketsServiceError::Internal { operation })
            });

        match &result {
            Err(BasketsServiceError::Cancelled) => {
                info!(operation, %client, "basket operation cancelled");
            }
            Err(error) => {
                warn!(operation, %client, "basket operation failed: {}", error_chain(error));
            }
            Ok(_) => {}
        }

        result
    }

    async fn update(
        &self,
        client: ClientId,
        change: Change<'_>,
        cancel: &CancellationToken,
    ) -> Result<Basket, BasketsServiceError> {
        let _guard = tokio::select! {
            () = cancel.cancelled() => return Err(BasketsServiceError::Cancelled),
            guard = self.locks.acquire(client) => guard,
        };

        let _lease = self
            .store
            .lease(client, cancel)
            .await
            .map_err(BasketsServiceError::store(StoreOperation::Lock, client))?;

        let previous = self
            .store
            .get(client, cancel)
            .await
            .map_err(BasketsServiceError::store(StoreOperation::Read, client))?;

        if previous.is_none() && matches!(change, Change::Remove(_)) {
            debug!(%client, "no stored basket to remove items from");

            return Ok(Basket::new(client));
        }

        let existing = previous.clone().unwrap_or_else(|| Basket::new(client));
        let merged = change.apply(&existing)?;

        debug!(
            operation = change.operation(),
            %client,
            items = merged.items().len(),
            "merged basket"
        );

        let (stored, total) = tokio::join!(
            self.store.store(merged.clone(), cancel),
            self.calculator.compute_total(merged.items(), cancel),
        );

        let total = match (stored, total) {
            (Ok(_), Ok(total)) => total,
            (Ok(_), Err(cost)) => {
                self.restore(client, previous).await;

                return Err(cost.into());
            }
            (Err(store), Ok(_)) => {
                return Err(BasketsServiceError::store(StoreOperation::Write, client)(store));
            }
            (Err(store), Err(cost)) => {
                if store.is_cancelled() || cost.is_cancelled() {
                    return Err(BasketsServiceError::Cancelled);
                }

                return Err(BasketsServiceError::StoreAndPricing {
                    client,
                    store,
                    cost,
                });
            }
        };

        match self.store.store(merged.priced(total), cancel).await {
            Ok(basket) => {
                info!(
                    operation = change.operation(),
                    %client,
                    total = total.to_minor(),
                    "updated basket"
                );

                Ok(basket)
            }
            Err(store) => {
                self.restore(client, previous).await;

                Err(BasketsServiceError::store(StoreOperation::Write, client)(store))
            }
        }
    }

    /// Put back the basket that was stored before a failed update.
    ///
    /// Runs to completion even if the caller has cancelled.
    async fn restore(&self, client: ClientId, previous: Option<Basket>) {
        let detached = CancellationToken::new();

        let restored = match previous {
            Some(basket) => self.store.store(basket, &detached).await.map(|_basket| ()),
            None => self.store.delete(client, &detached).await,
        };

        if let Err(error) = restored {
            error!(%client, "failed to restore basket after failed update: {error}");
        }
    }
}

#[async_trait]
impl BasketsService for BasketOrchestrator {
    async fn add_items(
        &self,
        client: ClientId,
        delta: BasketItems,
        cancel: &CancellationToken,
    ) -> Result<Basket, BasketsServiceError> {
        let change = Change::Add(&delta);

        Self::guarded(change.operation(), client, cancel, async {
            delta.validate_delta()?;

            self.update(client, change, cancel).await
        })
        .await
    }

    async fn remove_items(
        &self,
        client: ClientId,
        delta: BasketItems,
        cancel: &CancellationToken,
    ) -> Result<Basket, BasketsServiceError> {
        let change = Change::Remove(&delta);

        Self::guarded(change.operation(), client, cancel, async {
            delta.validate_delta()?;

            self.update(client, change, cancel).await
        })
        .await
    }

    async fn get_basket(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<Basket, BasketsServiceError> {
        Self::guarded("get_basket", client, cancel, async {
            let _guard = tokio::select! {
                () = cancel.cancelled() => return Err(BasketsServiceError::Cancelled),
                guard = self.locks.acquire(client) => guard,
            };

            let basket = self
                .store
                .get(client, cancel)
                .await
                .map_err(BasketsServiceError::store(StoreOperation::Read, client))?;

            match basket {
                None => Ok(Basket::new(client)),
                Some(basket) if basket.is_priced() => Ok(basket),
                Some(basket) => {
                    warn!(%client, "stored basket is unpriced, repricing");

                    let total = self.calculator.compute_total(basket.items(), cancel).await?;

                    Ok(basket.priced(total))
                }
            }
        })
        .await
    }

    async fn delete_basket(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<(), BasketsServiceError> {
        Self::guarded("delete_basket", client, cancel, async {
            let _guard = tokio::select! {
                () = cancel.cancelled() => return Err(BasketsServiceError::Cancelled),
                guard = self.locks.acquire(client) => guard,
            };

            let _lease = self
                .store
                .lease(client, cancel)
                .await
                .map_err(BasketsServiceError::store(StoreOperation::Lock, client))?;

            self.store
                .delete(client, cancel)
                .await
                .map_err(BasketsServiceError::store(StoreOperation::Delete, client))?;

            info!(%client, "deleted basket");

            Ok(())
        })
        .await
    }
}

#[automock]
#[async_trait]
pub trait BasketsService: Send + Sync {
    /// Add the quantities in `delta` to the client's basket and reprice it.
    async fn add_items(
        &self,
        client: ClientId,
        delta: BasketItems,
        cancel: &CancellationToken,
    ) -> Result<Basket, BasketsServiceError>;

    /// Subtract the quantities in `delta` from the client's basket and reprice
    /// it. Items that reach zero are dropped.
    async fn remove_items(
        &self,
        client: ClientId,
        delta: BasketItems,
        cancel: &CancellationToken,
    ) -> Result<Basket, BasketsServiceError>;

    /// Retrieve the client's basket; an absent basket is returned empty. A
    /// stored basket left unpriced by an interrupted update is priced on read
    /// without being written back.
    async fn get_basket(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<Basket, BasketsServiceError>;

    /// Delete the client's basket.
    async fn delete_basket(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<(), BasketsServiceError>;
}
