//! Catalog

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Current unit prices, keyed by item identity, in minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(FxHashMap<String, u64>);

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit price for `identity`, if the catalog lists it.
    pub fn unit_price(&self, identity: &str) -> Option<u64> {
        self.0.get(identity).copied()
    }

    /// Add or replace the unit price for `identity`.
    pub fn insert(&mut self, identity: impl Into<String>, unit_price: u64) {
        self.0.insert(identity.into(), unit_price);
    }

    /// Iterate over `(identity, unit price)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(identity, price)| (identity.as_str(), *price))
    }

    /// Get the number of listed items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the catalog lists nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(identity, price)| (identity.into(), price))
                .collect(),
        )
    }
}

impl<S: Into<String>, const N: usize> From<[(S, u64); N]> for Catalog {
    fn from(entries: [(S, u64); N]) -> Self {
        entries.into_iter().collect()
    }
}
