//! Error types for symbolic streams

use symex_store::StoreError;

/// Errors raised by terminal stream operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// Failure of the backing store, unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Exploration produced more paths than allowed
    #[error("exploration exceeded {limit} paths")]
    PathLimitExceeded {
        /// Configured path budget
        limit: usize,
    },
}
