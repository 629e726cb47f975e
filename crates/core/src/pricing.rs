//! Pricing
//!
//! Integer-only basket pricing against a catalog and a list of promotions.

use thiserror::Error;

use crate::{
    basket::{BasketItems, TotalCost},
    catalog::Catalog,
    promotions::{GroupPrice, Promotion, PromotionIndex},
};

/// Errors that can occur while pricing a basket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The basket holds an item the catalog doesn't list.
    #[error("item {0} is not in the catalog")]
    UnknownItem(String),

    /// An intermediate amount overflowed.
    #[error("cost of item {0} overflowed")]
    Overflow(String),
}

/// What to do with basket items that have no catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownItemPolicy {
    /// Unknown items contribute nothing to the total.
    #[default]
    Ignore,

    /// Unknown items fail the whole pricing run.
    Reject,
}

/// Calculates the total cost of `items`.
///
/// Each item is priced independently: promotions only apply once the quantity
/// reaches the promotion's threshold, complete groups are priced by the
/// promotion and any remainder is charged at the catalog unit price.
///
/// # Errors
///
/// - [`PricingError::UnknownItem`]: an item has no catalog entry and `policy` is
///   [`UnknownItemPolicy::Reject`].
/// - [`PricingError::Overflow`]: an amount didn't fit in a `u64`.
pub fn total_cost(
    items: &BasketItems,
    catalog: &Catalog,
    promotions: &[Promotion],
    policy: UnknownItemPolicy,
) -> Result<TotalCost, PricingError> {
    let index = PromotionIndex::new(promotions);

    let total = items
        .sorted()
        .into_iter()
        .try_fold(0_u64, |total, (identity, quantity)| {
            let Some(unit_price) = catalog.unit_price(identity) else {
                return match policy {
                    UnknownItemPolicy::Ignore => Ok(total),
                    UnknownItemPolicy::Reject => {
                        Err(PricingError::UnknownItem(identity.to_string()))
                    }
                };
            };

            let cost = line_cost(quantity, unit_price, index.get(identity))
                .ok_or_else(|| PricingError::Overflow(identity.to_string()))?;

            total
                .checked_add(cost)
                .ok_or_else(|| PricingError::Overflow(identity.to_string()))
        })?;

    Ok(TotalCost::from_minor(total))
}

/// Cost of `quantity` units at `unit_price`, with an optional promotion.
///
/// Returns `None` on overflow.
pub fn line_cost(quantity: u32, unit_price: u64, promotion: Option<&Promotion>) -> Option<u64> {
    let quantity = u64::from(quantity);

    let Some(promotion) = promotion else {
        return quantity.checked_mul(unit_price);
    };

    let threshold = u64::from(promotion.quantity().get());

    if quantity < threshold {
        return quantity.checked_mul(unit_price);
    }

    let groups = quantity / threshold;
    let remainder = (quantity % threshold).checked_mul(unit_price)?;

    let grouped = match promotion.price() {
        GroupPrice::FixedCost(cost) => groups.checked_mul(cost)?,
        GroupPrice::Percentage(percent) => {
            let full = unit_price.checked_mul(groups)?;
            let discount = (full / 100).checked_mul(u64::from(percent))?;

            full.checked_sub(discount)?
        }
    };

    grouped.checked_add(remainder)
}
