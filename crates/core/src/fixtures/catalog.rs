//! Catalog Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Wrapper for catalog prices in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of item identity -> unit price (e.g., "0.50 GBP")
    pub items: FxHashMap<String, String>,
}
