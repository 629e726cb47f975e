//! Baskets service errors.

use std::fmt;

use checkout::{
    basket::{ClientId, DeltaError},
    merge::MergeError,
    pricing::PricingError,
};
use thiserror::Error;

use crate::{domain::pricing::CostError, sources::StoreError};

/// Basket store call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Lock,
    Read,
    Write,
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lock => "lock",
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        })
    }
}

#[derive(Debug, Error)]
pub enum BasketsServiceError {
    #[error("invalid item delta")]
    Validation(#[from] DeltaError),

    #[error("item {0} is not in the catalog")]
    UnknownCatalogItem(String),

    #[error("failed to fetch pricing data")]
    Fetch(#[source] CostError),

    #[error("failed to {operation} basket for client {client}")]
    Store {
        operation: StoreOperation,
        client: ClientId,
        #[source]
        source: StoreError,
    },

    #[error("failed to merge items into basket")]
    MergeConflict(#[from] MergeError),

    #[error("failed to price basket")]
    Pricing(#[source] PricingError),

    #[error("failed to store basket for client {client} ({store}) and to price it ({cost})")]
    StoreAndPricing {
        client: ClientId,
        store: StoreError,
        cost: CostError,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("unexpected fault during {operation}")]
    Internal { operation: &'static str },
}

impl BasketsServiceError {
    /// Build a mapper from a store failure, keeping cancellation distinct.
    pub(crate) fn store(
        operation: StoreOperation,
        client: ClientId,
    ) -> impl FnOnce(StoreError) -> Self {
        move |source| match source {
            StoreError::Cancelled => Self::Cancelled,
            source => Self::Store {
                operation,
                client,
                source,
            },
        }
    }

    /// Whether the caller cancelled the operation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Short description that is safe to show to callers.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(DeltaError::Empty) => {
                "Failed to update basket, did the request contain any items?".to_string()
            }
            Self::Validation(error) => format!("Invalid request: {error}"),
            Self::UnknownCatalogItem(identity) => format!("Item {identity} is not available"),
            Self::Fetch(_) => "Prices are currently unavailable, try again later".to_string(),
            Self::Store { operation, .. } => {
                format!("Failed to {operation} basket, try again later")
            }
            Self::StoreAndPricing { .. } => "Failed to update basket, try again later".to_string(),
            Self::MergeConflict(error) => format!("Failed to update basket: {error}"),
            Self::Pricing(_) => "Failed to price basket".to_string(),
            Self::Cancelled => "Request cancelled".to_string(),
            Self::Internal { .. } => "Something went wrong".to_string(),
        }
    }
}

impl From<CostError> for BasketsServiceError {
    fn from(error: CostError) -> Self {
        match error {
            error if error.is_cancelled() => Self::Cancelled,
            CostError::Pricing(PricingError::UnknownItem(identity)) => {
                Self::UnknownCatalogItem(identity)
            }
            CostError::Pricing(error) => Self::Pricing(error),
            error => Self::Fetch(error),
        }
    }
}
