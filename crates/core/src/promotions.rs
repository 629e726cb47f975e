//! Promotions
//!
//! Quantity-tiered promotions. Every complete group of `quantity` units of the
//! matching item is priced by the promotion; the remainder is charged at the
//! catalog unit price.

use std::num::NonZeroU32;

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised when constructing a promotion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromotionError {
    /// The promotion is not tied to an item identity.
    #[error("promotion identity must not be blank")]
    BlankIdentity,

    /// The group size was zero.
    #[error("promotion {0} must have a threshold quantity greater than zero")]
    ZeroQuantity(String),

    /// A percentage outside `0..=100` was supplied.
    #[error("promotion {identity} has percentage {percent}, expected 0-100")]
    PercentageOutOfRange {
        /// Identity of the offending promotion
        identity: String,
        /// The rejected percentage
        percent: u64,
    },
}

/// How a complete group of items is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupPrice {
    /// Each complete group costs this amount, in minor units.
    FixedCost(u64),

    /// Each complete group is reduced by this whole percentage.
    Percentage(u8),
}

/// A quantity-tiered discount rule for a single item identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    identity: String,
    quantity: NonZeroU32,
    price: GroupPrice,
}

impl Promotion {
    /// Create a promotion where every `quantity` units cost `cost` in total.
    ///
    /// # Errors
    ///
    /// Returns a [`PromotionError`] if the identity is blank or `quantity` is zero.
    pub fn fixed_cost(
        identity: impl Into<String>,
        quantity: u32,
        cost: u64,
    ) -> Result<Self, PromotionError> {
        Self::new(identity.into(), quantity, GroupPrice::FixedCost(cost))
    }

    /// Create a promotion where every `quantity` units are reduced by `percent`.
    ///
    /// # Errors
    ///
    /// Returns a [`PromotionError`] if the identity is blank, `quantity` is zero
    /// or `percent` exceeds 100.
    pub fn percentage(
        identity: impl Into<String>,
        quantity: u32,
        percent: u64,
    ) -> Result<Self, PromotionError> {
        let identity = identity.into();

        let percent = u8::try_from(percent)
            .ok()
            .filter(|percent| *percent <= 100)
            .ok_or_else(|| PromotionError::PercentageOutOfRange {
                identity: identity.clone(),
                percent,
            })?;

        Self::new(identity, quantity, GroupPrice::Percentage(percent))
    }

    fn new(identity: String, quantity: u32, price: GroupPrice) -> Result<Self, PromotionError> {
        if identity.trim().is_empty() {
            return Err(PromotionError::BlankIdentity);
        }

        let Some(quantity) = NonZeroU32::new(quantity) else {
            return Err(PromotionError::ZeroQuantity(identity));
        };

        Ok(Self {
            identity,
            quantity,
            price,
        })
    }

    /// Identity of the item this promotion applies to.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Number of units that make up one group.
    pub const fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// How a complete group is priced.
    pub const fn price(&self) -> GroupPrice {
        self.price
    }

    /// Whether complete groups are charged a fixed cost.
    pub const fn is_fixed_cost(&self) -> bool {
        matches!(self.price, GroupPrice::FixedCost(_))
    }
}

/// Promotions indexed by item identity.
///
/// When several promotions share an identity, the first one wins.
#[derive(Debug, Default)]
pub struct PromotionIndex<'a> {
    by_identity: FxHashMap<&'a str, &'a Promotion>,
}

impl<'a> PromotionIndex<'a> {
    /// Index a list of promotions.
    pub fn new(promotions: &'a [Promotion]) -> Self {
        let mut by_identity = FxHashMap::default();

        for promotion in promotions {
            by_identity.entry(promotion.identity()).or_insert(promotion);
        }

        Self { by_identity }
    }

    /// The promotion that applies to `identity`, if any.
    pub fn get(&self, identity: &str) -> Option<&'a Promotion> {
        self.by_identity.get(identity).copied()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn fixed_cost_promotion() -> TestResult {
        let promotion = Promotion::fixed_cost("Apple", 3, 130)?;

        assert_eq!(promotion.identity(), "Apple");
        assert_eq!(promotion.quantity().get(), 3);
        assert_eq!(promotion.price(), GroupPrice::FixedCost(130));
        assert!(promotion.is_fixed_cost());

        Ok(())
    }

    #[test]
    fn percentage_promotion() -> TestResult {
        let promotion = Promotion::percentage("Bread", 2, 10)?;

        assert_eq!(promotion.price(), GroupPrice::Percentage(10));
        assert!(!promotion.is_fixed_cost());

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let result = Promotion::fixed_cost("Apple", 0, 130);

        assert_eq!(result, Err(PromotionError::ZeroQuantity("Apple".to_string())));
    }

    #[test]
    fn blank_identity_is_rejected() {
        assert_eq!(
            Promotion::percentage(" ", 2, 10),
            Err(PromotionError::BlankIdentity)
        );
    }

    #[test]
    fn percentage_above_100_is_rejected() {
        let result = Promotion::percentage("Bread", 2, 101);

        assert!(matches!(
            result,
            Err(PromotionError::PercentageOutOfRange { percent: 101, .. })
        ));
    }

    #[test]
    fn index_keeps_first_match() -> TestResult {
        let promotions = [
            Promotion::fixed_cost("Apple", 3, 130)?,
            Promotion::fixed_cost("Apple", 2, 10)?,
            Promotion::percentage("Bread", 2, 10)?,
        ];

        let index = PromotionIndex::new(&promotions);

        assert_eq!(index.get("Apple"), promotions.first());
        assert_eq!(index.get("Bread"), promotions.get(2));
        assert!(index.get("Milk").is_none());

        Ok(())
    }
}
