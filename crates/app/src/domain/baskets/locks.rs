//! Per-client locks.
//!
//! Serializes read-modify-write cycles on one client's basket while leaving
//! other clients free to proceed. Entries are dropped once nobody holds or
//! waits on them.

use std::sync::Arc;

use checkout::basket::ClientId;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub(crate) struct ClientLocks {
    locks: Mutex<FxHashMap<ClientId, Arc<AsyncMutex<()>>>>,
}

impl ClientLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `client`'s basket.
    pub(crate) async fn acquire(&self, client: ClientId) -> ClientLockGuard<'_> {
        let lock = Arc::clone(self.locks.lock().entry(client).or_default());

        let mut guard = ClientLockGuard {
            client,
            locks: self,
            held: None,
        };

        guard.held = Some(lock.lock_owned().await);

        guard
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.lock().len()
    }
}

#[derive(Debug)]
pub(crate) struct ClientLockGuard<'a> {
    client: ClientId,
    locks: &'a ClientLocks,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for ClientLockGuard<'_> {
    fn drop(&mut self) {
        self.held.take();

        let mut locks = self.locks.locks.lock();

        if locks
            .get(&self.client)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.client);
        }
    }
}
