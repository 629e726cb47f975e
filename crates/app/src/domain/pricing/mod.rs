//! Pricing

pub mod calculator;
pub mod errors;

pub use calculator::CostCalculator;
pub use errors::CostError;
