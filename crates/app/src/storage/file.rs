//! YAML state file.
//!
//! Every write reads the whole file and replaces it with a temporary sibling
//! that is persisted over it, so a failed write leaves the previous state on
//! disk. Writers holding handles to the same file, in this process or another,
//! are serialised by an OS lock on `<state>.lock`; client leases lock
//! `<state>.locks/client-<id>.lock`. Lock files are left in place.

use std::{
    ffi::OsString,
    fs::{File, TryLockError},
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use checkout::basket::{Basket, ClientId};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tokio::{fs, sync::Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::sources::{BasketStore, StoreError, StoreLease};

const LOCK_RETRY: Duration = Duration::from_millis(5);

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    baskets: Vec<Basket>,
}

/// Baskets persisted to a YAML file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that the state file, if present, can be decoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn verify(&self) -> Result<(), StoreError> {
        self.load().await.map(|_state| ())
    }

    /// Sibling of the state file named `<state><suffix>`.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("state"), OsString::from);

        name.push(suffix);

        self.path.with_file_name(name)
    }

    fn directory(&self) -> PathBuf {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    async fn load(&self) -> Result<StateFile, StoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(StateFile::default()),
            Err(error) => return Err(StoreError::Read(error)),
        };

        if contents.trim().is_empty() {
            return Ok(StateFile::default());
        }

        serde_norway::from_str(&contents).map_err(StoreError::Decode)
    }

    async fn save(&self, state: &mut StateFile) -> Result<(), StoreError> {
        state.baskets.sort_by_key(Basket::client);

        let contents = serde_norway::to_string(state).map_err(StoreError::Encode)?;
        let directory = self.directory();
        let path = self.path.clone();

        fs::create_dir_all(&directory)
            .await
            .map_err(StoreError::Write)?;

        tokio::task::spawn_blocking(move || -> io::Result<()> {
            let mut staging = NamedTempFile::new_in(&directory)?;

            staging.write_all(contents.as_bytes())?;
            staging.as_file().sync_all()?;
            staging.persist(&path).map_err(|error| error.error)?;

            Ok(())
        })
        .await
        .map_err(|error| StoreError::Write(io::Error::other(error)))?
        .map_err(StoreError::Write)?;

        debug!(path = %self.path.display(), baskets = state.baskets.len(), "saved state file");

        Ok(())
    }

    async fn update<T>(
        &self,
        cancel: &CancellationToken,
        change: impl FnOnce(&mut StateFile) -> T + Send,
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;

        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }

        let _state_lock = lock_file(&self.sibling(".lock"), cancel).await?;

        let mut state = self.load().await?;
        let output = change(&mut state);

        self.save(&mut state).await?;

        Ok(output)
    }
}

/// Open `path` and take an exclusive OS lock on it, polling until the lock is
/// free or `cancel` fires. The lock is released when the file is dropped.
async fn lock_file(path: &Path, cancel: &CancellationToken) -> Result<File, StoreError> {
    if let Some(parent) = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent).await.map_err(StoreError::Lock)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)
        .await
        .map_err(StoreError::Lock)?
        .into_std()
        .await;

    loop {
        match file.try_lock() {
            Ok(()) => return Ok(file),
            Err(TryLockError::WouldBlock) => {
                trace!(path = %path.display(), "waiting for lock");
            }
            Err(TryLockError::Error(error)) => return Err(StoreError::Lock(error)),
        }

        tokio::select! {
            () = cancel.cancelled() => return Err(StoreError::Cancelled),
            () = tokio::time::sleep(LOCK_RETRY) => {}
        }
    }
}

#[async_trait]
impl BasketStore for FileStore {
    async fn lease(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<StoreLease, StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }

        let path = self
            .sibling(".locks")
            .join(format!("client-{client}.lock"));
        let file = lock_file(&path, cancel).await?;

        debug!(%client, path = %path.display(), "took basket lease");

        Ok(StoreLease::new(file))
    }

    async fn get(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<Option<Basket>, StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }

        let state = self.load().await?;

        Ok(state
            .baskets
            .into_iter()
            .find(|basket| basket.client() == client))
    }

    async fn store(
        &self,
        basket: Basket,
        cancel: &CancellationToken,
    ) -> Result<Basket, StoreError> {
        let stored = basket.clone();

        self.update(cancel, move |state| {
            state
                .baskets
                .retain(|existing| existing.client() != basket.client());
            state.baskets.push(basket);
        })
        .await?;

        Ok(stored)
    }

    async fn delete(
        &self,
        client: ClientId,
        cancel: &CancellationToken,
    ) -> Result<(), StoreError> {
        self.update(cancel, |state| {
            state.baskets.retain(|basket| basket.client() != client);
        })
        .await
    }
}
