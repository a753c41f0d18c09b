//! Error types for entity capabilities.

use docguard_store::StorageError;
use docguard_types::Kind;
use thiserror::Error;

/// An entity that should be unique already exists.
///
/// Built by a uniqueness strategy's `duplicate_error`; never raised by the
/// store on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DuplicateEntity {
    pub message: String,
}

/// Errors from uniqueness checks.
#[derive(Debug, Error)]
pub enum UniquenessError {
    /// The checked entity already exists.
    #[error(transparent)]
    Duplicate(#[from] DuplicateEntity),

    /// Identifier count does not match the ancestry path (a caller bug).
    #[error("ancestry path has {expected} kinds but {got} identifiers were given")]
    ArityMismatch { expected: usize, got: usize },

    /// The identifiers do not form a valid key.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] docguard_types::Error),

    /// The store failed while probing.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from ownership operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// The owner has not been saved, so it has no key to link to.
    #[error("owner has no key; save it before assigning ownership")]
    MissingKey,

    /// The owner is not of the configured owner kind.
    #[error("owner must be a {expected}, got {got}")]
    WrongKind { expected: Kind, got: Kind },

    /// The stored owner link does not decode as a key.
    #[error("owner link is not a key: {0}")]
    InvalidLink(#[from] docguard_types::Error),
}
