//! Cost calculation errors.

use checkout::pricing::PricingError;
use thiserror::Error;

use crate::sources::SourceError;

#[derive(Debug, Error)]
pub enum CostError {
    #[error("failed to fetch catalog")]
    Catalog(#[source] SourceError),

    #[error("failed to fetch promotions")]
    Promotions(#[source] SourceError),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl CostError {
    /// Whether the failure came from the caller cancelling the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Catalog(SourceError::Cancelled) | Self::Promotions(SourceError::Cancelled)
        )
    }
}
