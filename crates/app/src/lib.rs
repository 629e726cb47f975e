//! Basket service: per-client basket storage, merging and concurrent pricing.

pub mod context;
pub mod domain;
pub mod errors;
pub mod sources;
pub mod storage;

#[cfg(test)]
mod test;
