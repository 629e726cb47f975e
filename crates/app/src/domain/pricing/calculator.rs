//! Cost calculator.
//!
//! Fetches the catalog and the promotions concurrently, then prices a basket's
//! items against both.

use std::{fmt, sync::Arc};

use checkout::{
    basket::{BasketItems, TotalCost},
    pricing::{UnknownItemPolicy, total_cost},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    domain::pricing::CostError,
    sources::{CatalogSource, PromotionSource},
};

#[derive(Clone)]
pub struct CostCalculator {
    catalog: Arc<dyn CatalogSource>,
    promotions: Arc<dyn PromotionSource>,
    policy: UnknownItemPolicy,
}

impl fmt::Debug for CostCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostCalculator")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CostCalculator {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        promotions: Arc<dyn PromotionSource>,
        policy: UnknownItemPolicy,
    ) -> Self {
        Self {
            catalog,
            promotions,
            policy,
        }
    }

    /// Price `items` against freshly fetched catalog and promotion data.
    ///
    /// Both fetches run concurrently; the first one to fail aborts the other.
    ///
    /// # Errors
    ///
    /// - [`CostError::Catalog`] / [`CostError::Promotions`]: a fetch failed or
    ///   was cancelled.
    /// - [`CostError::Pricing`]: the items could not be priced.
    pub async fn compute_total(
        &self,
        items: &BasketItems,
        cancel: &CancellationToken,
    ) -> Result<TotalCost, CostError> {
        let (catalog, promotions) = tokio::try_join!(
            async {
                self.catalog
                    .get_items(cancel)
                    .await
                    .map_err(CostError::Catalog)
            },
            async {
                self.promotions
                    .get_promotions(cancel)
                    .await
                    .map_err(CostError::Promotions)
            },
        )?;

        if self.policy == UnknownItemPolicy::Ignore {
            for (identity, quantity) in items.sorted() {
                if catalog.unit_price(identity).is_none() {
                    warn!(identity, quantity, "item is not in the catalog, pricing at zero");
                }
            }
        }

        let total = total_cost(items, &catalog, &promotions, self.policy)?;

        debug!(
            items = items.len(),
            promotions = promotions.len(),
            total = total.to_minor(),
            "priced basket"
        );

        Ok(total)
    }
}
