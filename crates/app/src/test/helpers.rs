//! Test Helpers

use std::sync::Arc;

use checkout::{
    basket::{Basket, BasketItems, ClientId},
    catalog::Catalog,
    pricing::{UnknownItemPolicy, total_cost},
    promotions::{Promotion, PromotionError},
};

use crate::{
    domain::pricing::CostCalculator,
    storage::{StaticCatalog, StaticPromotions},
};

pub(crate) fn kata_catalog() -> Catalog {
    Catalog::from([("Apple", 50), ("Bread", 120), ("Milk", 90)])
}

pub(crate) fn kata_promotions() -> Result<Vec<Promotion>, PromotionError> {
    Ok(vec![
        Promotion::fixed_cost("Apple", 3, 130)?,
        Promotion::percentage("Bread", 2, 10)?,
    ])
}

/// Calculator over the kata catalog without promotions.
pub(crate) fn kata_calculator() -> CostCalculator {
    CostCalculator::new(
        Arc::new(StaticCatalog::new(kata_catalog())),
        Arc::new(StaticPromotions::new(Vec::new())),
        UnknownItemPolicy::Ignore,
    )
}

/// A basket for `client` priced against the kata catalog alone.
///
/// Left unpriced if an item is missing from the catalog.
pub(crate) fn priced_basket<const N: usize>(client: u64, items: [(&str, u32); N]) -> Basket {
    let basket = Basket::unpriced(ClientId::new(client), BasketItems::from(items));

    match total_cost(basket.items(), &kata_catalog(), &[], UnknownItemPolicy::Ignore) {
        Ok(total) => basket.priced(total),
        Err(_) => basket,
    }
}
