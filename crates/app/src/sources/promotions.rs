//! Promotion source.

use async_trait::async_trait;
use checkout::promotions::Promotion;
use mockall::automock;
use tokio_util::sync::CancellationToken;

use crate::sources::SourceError;

#[automock]
#[async_trait]
pub trait PromotionSource: Send + Sync {
    /// Fetch the active promotions, in priority order.
    async fn get_promotions(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Promotion>, SourceError>;
}
