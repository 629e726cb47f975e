//! Checkout
//!
//! Basket valuation for quantity-tiered promotions: merging item deltas into
//! stored baskets and pricing them against a catalog.

pub mod basket;
pub mod catalog;
pub mod fixtures;
pub mod merge;
pub mod prelude;
pub mod pricing;
pub mod promotions;
