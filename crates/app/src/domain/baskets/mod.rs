//! Baskets

pub mod errors;
mod locks;
pub mod outcome;
pub mod service;

pub use errors::BasketsServiceError;
pub use outcome::Outcome;
pub use service::*;
