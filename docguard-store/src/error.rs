//! Error types for the storage layer.

use docguard_model::ValidationError;
use docguard_types::Key;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity not found.
    #[error("entity not found: {0}")]
    NotFound(Key),

    /// A validating pre-save hook rejected the entity.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Any other pre-save hook rejected the entity.
    #[error("pre-save hook {hook} rejected entity: {reason}")]
    Hook { hook: String, reason: String },

    /// A key could not be built for the entity.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] docguard_types::Error),

    /// Entity is not storable as given.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
