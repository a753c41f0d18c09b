//! Core type definitions for docguard.
//!
//! This crate defines the addressing types every other docguard crate
//! depends on:
//! - [`Kind`]: the type name of an entity (a table/collection name)
//! - [`Identifier`]: the id of one entity within its parent and kind
//! - [`Key`]: the ancestry chain of `(Kind, Identifier)` pairs
//!
//! Keys are immutable once built. The document store is the only party
//! that allocates them (on first put); everything else just compares them.

mod key;
pub mod timestamp;

pub use key::{Identifier, Key, Kind};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or decoding keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("key must contain at least one (kind, id) pair")]
    EmptyKey,

    #[error("empty {0} in key pair")]
    EmptyName(&'static str),

    #[error("malformed key: {0}")]
    MalformedKey(String),
}
