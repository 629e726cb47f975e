//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketItems, ClientId, DeltaError, TotalCost},
    catalog::Catalog,
    fixtures::{Fixture, FixtureError},
    merge::{MergeError, add_items, remove_items},
    pricing::{PricingError, UnknownItemPolicy, line_cost, total_cost},
    promotions::{GroupPrice, Promotion, PromotionError, PromotionIndex},
};
