//! Basket store.

use std::{any::Any, fmt};

use async_trait::async_trait;
use checkout::basket::{Basket, ClientId};
use mockall::automock;
use tokio_util::sync::CancellationToken;

use crate::sources::StoreError;

/// Exclusive hold on one client's stored basket, released on drop.
///
/// While a lease is held no other handle to the same store, in this process
/// or another, can take a lease for that client.
#[derive(Default)]
pub struct StoreLease {
    hold: Option<Box<dyn Any + Send + Sync>>,
}

impl StoreLease {
    /// A lease kept alive by `hold`; dropping the lease drops it.
    pub fn new(hold: impl Any + Send + Sync) -> Self {
        Self {
            hold: Some(Box::new(hold)),
        }
    }
}

impl fmt::Debug for StoreLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreLease")
            .field("held", &self.hold.is_some())
            .finish()
    }
}

#[automock]
#[async_trait]
pub trait BasketStore: Send + Sync {
    /// Take the lease for `client`, waiting until any other holder releases it.
    ///
    /// Stores that are never shared outside one process return an empty lease.
    async fn lease(
        &self,
        _client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<StoreLease, StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }

        Ok(StoreLease::default())
    }

    /// Load the basket stored for `client`, or `None` when nothing is stored.
    async fn get(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<Option<Basket>, StoreError>;

    /// Persist `basket` under its client, replacing any previous value, and
    /// return what was stored.
    async fn store(&self, basket: Basket, cancel: &CancellationToken)
    -> Result<Basket, StoreError>;

    /// Remove the basket stored for `client`. Removing nothing is not an error.
    async fn delete(&self, client: ClientId, cancel: &CancellationToken)
    -> Result<(), StoreError>;
}
