//! Merging item deltas into stored baskets.
//!
//! Both directions work on a copy of the stored items, so a failed merge never
//! yields a partially updated item set.

use thiserror::Error;

use crate::basket::{Basket, BasketItems};

/// Errors raised while merging a delta into a basket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// Accumulating the quantity for an item overflowed.
    #[error("quantity for item {identity} cannot exceed {max}", max = u32::MAX)]
    QuantityOverflow {
        /// Identity of the item that could not be merged
        identity: String,
    },
}

/// Add every quantity in `delta` to `existing`.
///
/// Items already in the basket accumulate; new identities are inserted with the
/// incoming quantity. The returned basket is unpriced.
///
/// # Errors
///
/// Returns [`MergeError::QuantityOverflow`] if any accumulated quantity would
/// overflow. The existing basket is left untouched in that case.
pub fn add_items(existing: &Basket, delta: &BasketItems) -> Result<Basket, MergeError> {
    let mut items = existing.items().clone();

    for (identity, quantity) in delta.iter() {
        let current = items.quantity(identity).unwrap_or(0);

        let merged = current
            .checked_add(quantity)
            .ok_or_else(|| MergeError::QuantityOverflow {
                identity: identity.to_string(),
            })?;

        items.set(identity, merged);
    }

    Ok(rebuild(existing, items))
}

/// Subtract every quantity in `delta` from `existing`.
///
/// Quantities never drop below zero; an item that reaches zero is removed from
/// the basket. Identities the basket doesn't hold are ignored. The returned
/// basket is unpriced.
pub fn remove_items(existing: &Basket, delta: &BasketItems) -> Basket {
    let mut items = existing.items().clone();

    for (identity, quantity) in delta.iter() {
        let Some(current) = items.quantity(identity) else {
            continue;
        };

        match current.saturating_sub(quantity) {
            0 => {
                items.remove(identity);
            }
            remaining => items.set(identity, remaining),
        }
    }

    rebuild(existing, items)
}

fn rebuild(existing: &Basket, items: BasketItems) -> Basket {
    Basket::unpriced(existing.client(), items)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::basket::{ClientId, TotalCost};

    use super::*;

    fn basket(items: BasketItems) -> Basket {
        Basket::unpriced(ClientId::new(1), items).priced(TotalCost::from_minor(100))
    }

    #[test]
    fn add_accumulates_existing_quantities() -> TestResult {
        let existing = basket(BasketItems::from([("Apple", 2)]));

        let merged = add_items(&existing, &BasketItems::from([("Apple", 3)]))?;

        assert_eq!(merged.items().quantity("Apple"), Some(5));
        assert!(!merged.is_priced(), "merge must drop the stale total");

        Ok(())
    }

    #[test]
    fn add_inserts_new_identities() -> TestResult {
        let existing = basket(BasketItems::from([("Apple", 2)]));

        let merged = add_items(&existing, &BasketItems::from([("Bread", 1)]))?;

        assert_eq!(merged.items().quantity("Apple"), Some(2));
        assert_eq!(merged.items().quantity("Bread"), Some(1));
        assert_eq!(merged.items().len(), 2);

        Ok(())
    }

    #[test]
    fn add_into_empty_basket() -> TestResult {
        let merged = add_items(
            &Basket::new(ClientId::new(9)),
            &BasketItems::from([("Milk", 4)]),
        )?;

        assert_eq!(merged.client(), ClientId::new(9));
        assert_eq!(merged.items().quantity("Milk"), Some(4));

        Ok(())
    }

    #[test]
    fn add_overflow_fails_without_partial_result() {
        let existing = basket(BasketItems::from([("Apple", u32::MAX), ("Bread", 1)]));
        let delta = BasketItems::from([("Apple", 1), ("Bread", 1)]);

        let result = add_items(&existing, &delta);

        assert_eq!(
            result,
            Err(MergeError::QuantityOverflow {
                identity: "Apple".to_string()
            })
        );
        assert_eq!(existing.items().quantity("Bread"), Some(1));
    }

    #[test]
    fn remove_decrements_quantities() {
        let existing = basket(BasketItems::from([("Apple", 5)]));

        let merged = remove_items(&existing, &BasketItems::from([("Apple", 2)]));

        assert_eq!(merged.items().quantity("Apple"), Some(3));
    }

    #[test]
    fn remove_drops_items_that_reach_zero() {
        let existing = basket(BasketItems::from([("Apple", 2), ("Bread", 1)]));

        let merged = remove_items(&existing, &BasketItems::from([("Apple", 7)]));

        assert_eq!(merged.items().quantity("Apple"), None);
        assert_eq!(merged.items().quantity("Bread"), Some(1));
    }

    #[test]
    fn remove_ignores_unknown_identities() {
        let existing = basket(BasketItems::from([("Apple", 2)]));

        let merged = remove_items(&existing, &BasketItems::from([("Pear", 1)]));

        assert_eq!(merged.items(), existing.items());
    }

    #[test]
    fn remove_everything_leaves_empty_basket() {
        let existing = basket(BasketItems::from([("Apple", 2)]));

        let merged = remove_items(&existing, &BasketItems::from([("Apple", 2)]));

        assert!(merged.is_empty());
    }
}
