//! Catalog source.

use async_trait::async_trait;
use checkout::catalog::Catalog;
use mockall::automock;
use tokio_util::sync::CancellationToken;

use crate::sources::SourceError;

#[automock]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the current unit price of every catalog item.
    async fn get_items(&self, cancel: &CancellationToken) -> Result<Catalog, SourceError>;
}
