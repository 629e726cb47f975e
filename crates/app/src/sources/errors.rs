//! Source errors.

use thiserror::Error;

/// Failure fetching catalog or promotion data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("request cancelled")]
    Cancelled,
}

/// Failure reading or writing the basket store.
///
/// A write that returns an error must not have been applied.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("basket store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read state file")]
    Read(#[source] std::io::Error),

    #[error("failed to write state file")]
    Write(#[source] std::io::Error),

    #[error("failed to lock state file")]
    Lock(#[source] std::io::Error),

    #[error("failed to decode state file")]
    Decode(#[source] serde_norway::Error),

    #[error("failed to encode state file")]
    Encode(#[source] serde_norway::Error),

    #[error("request cancelled")]
    Cancelled,
}

impl StoreError {
    /// Whether the call was abandoned because the caller cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn io_failures_name_the_failed_step() {
        let read = StoreError::Read(io::Error::other("eio"));
        let write = StoreError::Write(io::Error::other("enospc"));
        let lock = StoreError::Lock(io::Error::other("enolck"));

        assert_eq!(read.to_string(), "failed to read state file");
        assert_eq!(write.to_string(), "failed to write state file");
        assert_eq!(lock.to_string(), "failed to lock state file");
    }
}
