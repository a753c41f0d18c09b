//! Uniqueness strategies.
//!
//! Both strategies are advisory: `is_unique` reports, `duplicate_error`
//! builds the error, and the caller decides whether to check first or raise
//! unconditionally. Neither is atomic with the caller's subsequent write.

use crate::{DuplicateEntity, UniquenessError};
use docguard_store::{DocumentStore, Query};
use docguard_types::{Identifier, Key, Kind};
use serde_json::{Map, Value};
use tracing::debug;

/// Shared shape of the uniqueness strategies.
pub trait UniquenessStrategy {
    /// What the caller supplies to identify the candidate entity.
    type Args: ?Sized;

    /// True if no stored entity collides with `args`.
    fn is_unique<S>(&self, store: &S, args: &Self::Args) -> Result<bool, UniquenessError>
    where
        S: DocumentStore + ?Sized;

    /// Describes the collision for `args` without checking the store.
    fn duplicate_error(&self, args: &Self::Args) -> UniquenessError;

    /// Checks, and returns the duplicate error if the check fails.
    fn ensure_unique<S>(&self, store: &S, args: &Self::Args) -> Result<(), UniquenessError>
    where
        S: DocumentStore + ?Sized,
    {
        if self.is_unique(store, args)? {
            Ok(())
        } else {
            Err(self.duplicate_error(args))
        }
    }
}

/// Uniqueness by exact key: an entity is unique if nothing is stored at the
/// key formed by its ancestry path and identifiers.
///
/// The kind path (ancestors followed by the entity's own kind) is computed
/// once here and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestryUniqueness {
    path: Vec<Kind>,
}

impl AncestryUniqueness {
    /// `ancestors` lists ancestor kinds root first; `kind` is the entity's own.
    pub fn new<I, K>(ancestors: I, kind: impl Into<Kind>) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Kind>,
    {
        let mut path: Vec<Kind> = ancestors.into_iter().map(Into::into).collect();
        path.push(kind.into());
        Self { path }
    }

    /// Full kind path, root first, ending with the entity's own kind.
    #[must_use]
    pub fn path(&self) -> &[Kind] {
        &self.path
    }

    /// Zips the kind path with `ids` into a key.
    ///
    /// `ids` must have one identifier per kind in the path, the entity's own
    /// identifier last.
    pub fn key_for(&self, ids: &[Identifier]) -> Result<Key, UniquenessError> {
        if ids.len() != self.path.len() {
            return Err(UniquenessError::ArityMismatch {
                expected: self.path.len(),
                got: ids.len(),
            });
        }
        let key = Key::new(self.path.iter().cloned().zip(ids.iter().cloned()))?;
        Ok(key)
    }
}

impl UniquenessStrategy for AncestryUniqueness {
    type Args = [Identifier];

    /// One point lookup. Key lookups are strongly consistent, so a sibling
    /// written just before is seen.
    fn is_unique<S>(&self, store: &S, ids: &[Identifier]) -> Result<bool, UniquenessError>
    where
        S: DocumentStore + ?Sized,
    {
        let key = self.key_for(ids)?;
        let unique = !store.exists(&key)?;
        debug!("ancestry uniqueness lookup {key}: unique={unique}");
        Ok(unique)
    }

    fn duplicate_error(&self, ids: &[Identifier]) -> UniquenessError {
        match self.key_for(ids) {
            Ok(key) => DuplicateEntity {
                message: format!("Entity with key {key} exists"),
            }
            .into(),
            Err(e) => e,
        }
    }
}

/// Uniqueness by property values: an entity is unique if no stored entity
/// of the kind has all the listed properties equal to the given values.
///
/// The check is one equality query combining every property with AND. It
/// goes through a secondary index, so it may not yet see a very recent
/// write in eventually consistent stores.
///
/// Values are compared against the stored form, so a decimal property
/// must be passed through [`ScaledDecimal::filter_value`] first.
///
/// [`ScaledDecimal::filter_value`]: docguard_props::ScaledDecimal::filter_value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyUniqueness {
    kind: Kind,
    properties: Vec<String>,
}

impl PropertyUniqueness {
    pub fn new<I, S>(kind: impl Into<Kind>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Query matching entities whose listed properties all equal `values`.
    /// Properties missing from `values` are compared against `null`.
    #[must_use]
    pub fn query_for(&self, values: &Map<String, Value>) -> Query {
        self.properties
            .iter()
            .fold(Query::new(self.kind.clone()), |q, prop| {
                q.eq(prop.as_str(), values.get(prop).cloned().unwrap_or(Value::Null))
            })
    }
}

impl UniquenessStrategy for PropertyUniqueness {
    type Args = Map<String, Value>;

    fn is_unique<S>(&self, store: &S, values: &Map<String, Value>) -> Result<bool, UniquenessError>
    where
        S: DocumentStore + ?Sized,
    {
        let matches = store.count(&self.query_for(values))?;
        debug!(
            "property uniqueness query on {} [{}]: {matches} match(es)",
            self.kind,
            self.properties.join(", ")
        );
        Ok(matches == 0)
    }

    fn duplicate_error(&self, _values: &Map<String, Value>) -> UniquenessError {
        DuplicateEntity {
            message: format!(
                "Entity with specified {} exists",
                self.properties.join(", ")
            ),
        }
        .into()
    }
}
