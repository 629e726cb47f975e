//! Promotion Fixtures

use serde::Deserialize;

/// Wrapper for promotions in YAML
///
/// Promotions are kept as a list so that file order decides which promotion
/// wins when two share an identity.
#[derive(Debug, Deserialize)]
pub struct PromotionsFixture {
    /// Promotions in file order
    pub promotions: Vec<PromotionFixture>,
}

/// Promotion fixture from YAML
#[derive(Debug, Deserialize)]
pub struct PromotionFixture {
    /// Identity of the item the promotion applies to
    pub identity: String,

    /// Whether `value` is a group price ("1.30 GBP") or a percentage ("10%")
    #[serde(default)]
    pub is_fixed_cost: bool,

    /// Number of units per promotional group
    pub quantity: u32,

    /// Group price or percentage
    pub value: String,
}
