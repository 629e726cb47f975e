//! Fixtures
//!
//! YAML catalog and promotion sets, stored as `<base>/catalog/<name>.yml` and
//! `<base>/promotions/<name>.yml`.

use std::{fs, path::PathBuf};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    fixtures::{catalog::CatalogFixture, promotions::PromotionsFixture},
    promotions::{Promotion, PromotionError},
};

pub mod catalog;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Invalid promotion data
    #[error("Invalid promotion: {0}")]
    Promotion(#[from] PromotionError),
}

/// A loaded catalog and promotion set.
#[derive(Debug)]
pub struct Fixture {
    base_path: PathBuf,
    catalog: Catalog,
    promotions: Vec<Promotion>,
    currency: Option<&'static Currency>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            promotions: Vec::new(),
            currency: None,
        }
    }

    /// Load catalog prices from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if prices use
    /// more than one currency.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CatalogFixture = serde_norway::from_str(&contents)?;

        for (identity, price) in fixture.items {
            let minor_units = self.parse_price(&price)?;

            self.catalog.insert(identity, minor_units);
        }

        Ok(self)
    }

    /// Load promotions from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a promotion
    /// is invalid.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self
            .base_path
            .join("promotions")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let fixture: PromotionsFixture = serde_norway::from_str(&contents)?;

        for promotion_fixture in fixture.promotions {
            let promotion = if promotion_fixture.is_fixed_cost {
                let cost = self.parse_price(&promotion_fixture.value)?;

                Promotion::fixed_cost(
                    promotion_fixture.identity,
                    promotion_fixture.quantity,
                    cost,
                )?
            } else {
                let percent = parse_percentage(&promotion_fixture.value)?;

                Promotion::percentage(
                    promotion_fixture.identity,
                    promotion_fixture.quantity,
                    percent,
                )?
            };

            self.promotions.push(promotion);
        }

        Ok(self)
    }

    /// Load a complete fixture set (catalog and promotions with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in(name, "./fixtures")
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(name: &str, base_path: impl Into<PathBuf>) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture.load_catalog(name)?.load_promotions(name)?;

        Ok(fixture)
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The loaded promotions, in file order.
    pub fn promotions(&self) -> &[Promotion] {
        &self.promotions
    }

    /// Currency shared by every loaded price, if any prices were loaded.
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Split the fixture into its catalog and promotions.
    pub fn into_parts(self) -> (Catalog, Vec<Promotion>) {
        (self.catalog, self.promotions)
    }

    fn parse_price(&mut self, s: &str) -> Result<u64, FixtureError> {
        let (minor_units, currency) = parse_price(s)?;

        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(minor_units),
            None => {
                self.currency = Some(currency);

                Ok(minor_units)
            }
        }
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if
/// the amount is negative or cannot be parsed, or if the currency code is not
/// recognized.
pub fn parse_price(s: &str) -> Result<(u64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_u64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// Parse a whole percentage string (e.g., "15%") into its integer value
///
/// # Errors
///
/// Returns an error if the string lacks a `%` suffix or isn't a whole number.
pub fn parse_percentage(s: &str) -> Result<u64, FixtureError> {
    s.trim()
        .strip_suffix('%')
        .and_then(|percent| percent.trim().parse::<u64>().ok())
        .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))
}
