//! In-memory sources.

use std::time::Duration;

use async_trait::async_trait;
use checkout::{
    basket::{Basket, ClientId},
    catalog::Catalog,
    promotions::Promotion,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;

use crate::{
    sources::{BasketStore, CatalogSource, PromotionSource, SourceError, StoreError},
    storage::latency,
};

/// Baskets held in process memory.
#[derive(Debug, Default)]
pub struct MemoryBasketStore {
    baskets: RwLock<FxHashMap<ClientId, Basket>>,
    latency: Duration,
}

impl MemoryBasketStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency` before it takes effect.
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        Self { latency, ..self }
    }

    /// Seed the store with `basket`, bypassing latency and cancellation.
    pub fn insert(&self, basket: Basket) {
        self.baskets.write().insert(basket.client(), basket);
    }

    /// Snapshot of the basket stored for `client`.
    pub fn snapshot(&self, client: ClientId) -> Option<Basket> {
        self.baskets.read().get(&client).cloned()
    }
}

#[async_trait]
impl BasketStore for MemoryBasketStore {
    async fn get(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<Option<Basket>, StoreError> {
        if !latency::wait(self.latency, cancel).await {
            return Err(StoreError::Cancelled);
        }

        Ok(self.snapshot(client))
    }

    async fn store(
        &self,
        basket: Basket,
        cancel: &CancellationToken,
    ) -> Result<Basket, StoreError> {
        if !latency::wait(self.latency, cancel).await {
            return Err(StoreError::Cancelled);
        }

        self.insert(basket.clone());

        Ok(basket)
    }

    async fn delete(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        if !latency::wait(self.latency, cancel).await {
            return Err(StoreError::Cancelled);
        }

        self.baskets.write().remove(&client);

        Ok(())
    }
}

/// A fixed catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    catalog: Catalog,
    latency: Duration,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            latency: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        Self { latency, ..self }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn get_items(&self, cancel: &CancellationToken) -> Result<Catalog, SourceError> {
        if !latency::wait(self.latency, cancel).await {
            return Err(SourceError::Cancelled);
        }

        Ok(self.catalog.clone())
    }
}

/// A fixed promotion list.
#[derive(Debug, Clone, Default)]
pub struct StaticPromotions {
    promotions: Vec<Promotion>,
    latency: Duration,
}

impl StaticPromotions {
    #[must_use]
    pub fn new(promotions: Vec<Promotion>) -> Self {
        Self {
            promotions,
            latency: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        Self { latency, ..self }
    }
}

#[async_trait]
impl PromotionSource for StaticPromotions {
    async fn get_promotions(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Promotion>, SourceError> {
        if !latency::wait(self.latency, cancel).await {
            return Err(SourceError::Cancelled);
        }

        Ok(self.promotions.clone())
    }
}

#[cfg(test)]
mod tests {
    use checkout::basket::BasketItems;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn get_returns_none_for_unknown_client() -> TestResult {
        let store = MemoryBasketStore::new();

        let basket = store
            .get(ClientId::new(1), &CancellationToken::new())
            .await?;

        assert!(basket.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn store_then_get_round_trips() -> TestResult {
        let store = MemoryBasketStore::new();
        let cancel = CancellationToken::new();
        let basket = Basket::unpriced(ClientId::new(1), BasketItems::from([("Apple", 2)]));

        store.store(basket.clone(), &cancel).await?;

        assert_eq!(store.get(ClientId::new(1), &cancel).await?, Some(basket));

        Ok(())
    }

    #[tokio::test]
    async fn cancelled_store_is_not_applied() {
        let store = MemoryBasketStore::new().with_latency(Duration::from_secs(30));
        let cancel = CancellationToken::new();

        cancel.cancel();

        let result = store.store(Basket::new(ClientId::new(4)), &cancel).await;

        assert!(matches!(result, Err(StoreError::Cancelled)));
        assert!(store.snapshot(ClientId::new(4)).is_none());
    }

    #[tokio::test]
    async fn cancelling_mid_latency_returns_promptly() {
        let catalog = StaticCatalog::new(Catalog::new()).with_latency(Duration::from_secs(30));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(Duration::from_secs(5), catalog.get_items(&cancel)).await;

        assert!(matches!(result, Ok(Err(SourceError::Cancelled))));
    }
}
