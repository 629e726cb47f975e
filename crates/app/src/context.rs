//! App Context

use std::{path::Path, sync::Arc};

use checkout::{
    fixtures::{Fixture, FixtureError},
    pricing::UnknownItemPolicy,
};
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::info;

use crate::{
    domain::{
        baskets::{BasketOrchestrator, BasketsService},
        pricing::CostCalculator,
    },
    sources::StoreError,
    storage::{FileStore, StaticCatalog, StaticPromotions},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to load fixture set")]
    Fixture(#[from] FixtureError),

    #[error("failed to open state file")]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct AppContext {
    pub baskets: Arc<dyn BasketsService>,
    pub currency: Option<&'static Currency>,
}

impl AppContext {
    /// Build application context from a fixture set and a state file.
    ///
    /// # Errors
    ///
    /// Returns an error when the fixture set cannot be loaded or the state file
    /// exists but cannot be decoded.
    pub async fn from_fixture_set(
        fixtures_dir: &Path,
        set: &str,
        state_file: &Path,
        policy: UnknownItemPolicy,
    ) -> Result<Self, AppInitError> {
        let fixture = Fixture::from_set_in(set, fixtures_dir)?;
        let currency = fixture.currency();
        let (catalog, promotions) = fixture.into_parts();

        info!(
            set,
            items = catalog.len(),
            promotions = promotions.len(),
            "loaded fixture set"
        );

        let store = FileStore::new(state_file);

        store.verify().await?;

        let calculator = CostCalculator::new(
            Arc::new(StaticCatalog::new(catalog)),
            Arc::new(StaticPromotions::new(promotions)),
            policy,
        );

        Ok(Self {
            baskets: Arc::new(BasketOrchestrator::new(Arc::new(store), calculator)),
            currency,
        })
    }
}
