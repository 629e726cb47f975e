//! Checkout Domain Concerns

pub mod baskets;
pub mod pricing;
