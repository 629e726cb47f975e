//! Basket

use std::fmt::{Display, Formatter, Result as FmtResult};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when an incoming item delta is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeltaError {
    /// The delta contained no items at all.
    #[error("the request did not contain any items")]
    Empty,

    /// An item identity was blank.
    #[error("item identities must not be blank")]
    BlankIdentity,

    /// An item was submitted with a zero quantity.
    #[error("item {0} must have a quantity greater than zero")]
    ZeroQuantity(String),
}

/// Identity of the client a basket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(u64);

impl ClientId {
    /// Wrap a raw client identity.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Return the raw client identity.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ClientId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Item identities mapped to their quantities.
///
/// Used both for the contents of a stored basket and for the deltas submitted
/// against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasketItems(FxHashMap<String, u32>);

impl BasketItems {
    /// Create an empty item set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity held for `identity`, if any.
    pub fn quantity(&self, identity: &str) -> Option<u32> {
        self.0.get(identity).copied()
    }

    /// Set the quantity for `identity`, replacing any previous value.
    pub fn set(&mut self, identity: impl Into<String>, quantity: u32) {
        self.0.insert(identity.into(), quantity);
    }

    /// Remove `identity` from the set, returning its quantity.
    pub fn remove(&mut self, identity: &str) -> Option<u32> {
        self.0.remove(identity)
    }

    /// Iterate over `(identity, quantity)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(identity, quantity)| (identity.as_str(), *quantity))
    }

    /// Iterate over the pairs sorted by identity.
    pub fn sorted(&self) -> Vec<(&str, u32)> {
        let mut items: Vec<_> = self.iter().collect();

        items.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

        items
    }

    /// Get the number of distinct item identities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no items.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that this set is usable as an add/remove delta.
    ///
    /// # Errors
    ///
    /// Returns a [`DeltaError`] if the set is empty, contains a blank identity,
    /// or contains a zero quantity.
    pub fn validate_delta(&self) -> Result<(), DeltaError> {
        if self.is_empty() {
            return Err(DeltaError::Empty);
        }

        for (identity, quantity) in self.sorted() {
            if identity.trim().is_empty() {
                return Err(DeltaError::BlankIdentity);
            }

            if quantity == 0 {
                return Err(DeltaError::ZeroQuantity(identity.to_string()));
            }
        }

        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for BasketItems {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(identity, quantity)| (identity.into(), quantity))
                .collect(),
        )
    }
}

impl<S: Into<String>, const N: usize> From<[(S, u32); N]> for BasketItems {
    fn from(items: [(S, u32); N]) -> Self {
        items.into_iter().collect()
    }
}

/// Total cost of a basket in the currency's minor unit.
///
/// Outside this crate a total is only obtained from
/// [`crate::pricing::total_cost`] or by decoding a basket that was persisted
/// after being priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TotalCost(u64);

impl TotalCost {
    pub(crate) const ZERO: Self = Self(0);

    pub(crate) const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Return the total in minor units.
    pub const fn to_minor(self) -> u64 {
        self.0
    }
}

impl Display for TotalCost {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// A client's basket.
///
/// A basket whose items changed since it was last priced carries no total, so
/// a stale total can never be read back alongside newer items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    client: ClientId,
    items: BasketItems,
    #[serde(default)]
    total_cost: Option<TotalCost>,
}

impl Basket {
    /// Create an empty basket for the given client. Its total is zero.
    pub fn new(client: ClientId) -> Self {
        Self {
            client,
            items: BasketItems::new(),
            total_cost: Some(TotalCost::ZERO),
        }
    }

    /// Create a basket holding `items` that has not been priced yet.
    pub fn unpriced(client: ClientId, items: BasketItems) -> Self {
        Self {
            client,
            items,
            total_cost: None,
        }
    }

    /// Attach a freshly computed total.
    #[must_use]
    pub fn priced(self, total_cost: TotalCost) -> Self {
        Self {
            total_cost: Some(total_cost),
            ..self
        }
    }

    /// The client this basket belongs to.
    pub const fn client(&self) -> ClientId {
        self.client
    }

    /// The items held in the basket.
    pub const fn items(&self) -> &BasketItems {
        &self.items
    }

    /// The total computed for the current items, or `None` if the items
    /// changed without being repriced.
    pub const fn total_cost(&self) -> Option<TotalCost> {
        self.total_cost
    }

    /// Check if the total reflects the current items.
    pub const fn is_priced(&self) -> bool {
        self.total_cost.is_some()
    }

    /// Check if the basket holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_basket_is_empty_with_zero_total() {
        let basket = Basket::new(ClientId::new(7));

        assert_eq!(basket.client(), ClientId::new(7));
        assert!(basket.is_empty());
        assert_eq!(basket.total_cost(), Some(TotalCost::ZERO));
    }

    #[test]
    fn validate_delta_rejects_empty() {
        assert_eq!(BasketItems::new().validate_delta(), Err(DeltaError::Empty));
    }

    #[test]
    fn validate_delta_rejects_blank_identity() {
        let items = BasketItems::from([("  ", 1)]);

        assert_eq!(items.validate_delta(), Err(DeltaError::BlankIdentity));
    }

    #[test]
    fn validate_delta_rejects_zero_quantity() {
        let items = BasketItems::from([("Apple", 2), ("Bread", 0)]);

        assert_eq!(
            items.validate_delta(),
            Err(DeltaError::ZeroQuantity("Bread".to_string()))
        );
    }

    #[test]
    fn validate_delta_accepts_positive_quantities() -> TestResult {
        BasketItems::from([("Apple", 2), ("Bread", 1)]).validate_delta()?;

        Ok(())
    }

    #[test]
    fn sorted_orders_by_identity() {
        let items = BasketItems::from([("Pear", 1), ("Apple", 3), ("Milk", 2)]);

        assert_eq!(items.sorted(), vec![("Apple", 3), ("Milk", 2), ("Pear", 1)]);
    }

    #[test]
    fn unpriced_basket_has_no_total_until_priced() {
        let basket = Basket::unpriced(ClientId::new(1), BasketItems::from([("Apple", 7)]));

        assert!(!basket.is_priced());
        assert_eq!(basket.total_cost(), None);

        let basket = basket.priced(TotalCost::from_minor(310));

        assert_eq!(basket.total_cost(), Some(TotalCost::from_minor(310)));
        assert_eq!(basket.items().quantity("Apple"), Some(7));
    }

    #[test]
    fn unpriced_basket_round_trips_without_total() -> TestResult {
        let basket = Basket::unpriced(ClientId::new(2), BasketItems::from([("Milk", 1)]));

        let yaml = serde_norway::to_string(&basket)?;
        let decoded: Basket = serde_norway::from_str(&yaml)?;

        assert_eq!(decoded, basket);
        assert!(!decoded.is_priced());

        Ok(())
    }
}
