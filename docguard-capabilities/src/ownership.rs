//! Ownership links.
//!
//! An owned entity stores its owner's key in one property, never a copy of
//! the owner's data.

use crate::OwnershipError;
use docguard_model::Entity;
use docguard_store::{PreSaveHook, Query, StorageError, StorageResult};
use docguard_types::{Key, Kind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Anything that resolves to an owner key: a key itself, or a saved entity.
pub trait OwnerRef {
    /// The owner's key, or `None` if it has none yet.
    fn owner_key(&self) -> Option<Key>;
}

impl OwnerRef for Key {
    fn owner_key(&self) -> Option<Key> {
        Some(self.clone())
    }
}

impl OwnerRef for Entity {
    fn owner_key(&self) -> Option<Key> {
        self.key.clone()
    }
}

/// Ownership configuration for one entity type.
///
/// As a pre-save hook it requires a valid owner link on every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ownership {
    /// Property holding the owner key.
    pub property: String,
    /// Restricts owners to one kind when set.
    pub owner_kind: Option<Kind>,
}

impl Default for Ownership {
    fn default() -> Self {
        Self {
            property: "owner".to_string(),
            owner_kind: None,
        }
    }
}

impl Ownership {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept owners of `kind`.
    #[must_use]
    pub fn owned_by(mut self, kind: impl Into<Kind>) -> Self {
        self.owner_kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = property.into();
        self
    }

    /// Resolves `owner` to a key of the configured kind.
    pub fn resolve(&self, owner: &impl OwnerRef) -> Result<Key, OwnershipError> {
        let key = owner.owner_key().ok_or(OwnershipError::MissingKey)?;
        self.check_kind(&key)?;
        Ok(key)
    }

    /// Links `entity` to `owner`.
    pub fn assign_owner<'a>(
        &self,
        entity: &'a mut Entity,
        owner: &impl OwnerRef,
    ) -> Result<&'a mut Entity, OwnershipError> {
        let key = self.resolve(owner)?;
        entity.set(self.property.clone(), key.to_value());
        Ok(entity)
    }

    /// The owner key stored on `entity`, if any.
    pub fn owner_of(&self, entity: &Entity) -> Result<Option<Key>, OwnershipError> {
        match entity.get(&self.property) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(Key::from_value(value)?)),
        }
    }

    /// True if `entity` is linked to `owner`. An owner without a key, or an
    /// entity without a readable link, owns nothing.
    pub fn is_owner(&self, entity: &Entity, owner: &impl OwnerRef) -> bool {
        match (owner.owner_key(), self.owner_of(entity)) {
            (Some(owner), Ok(Some(linked))) => owner == linked,
            _ => false,
        }
    }

    /// Query for entities of `kind` owned by `owner`. Not executed; the
    /// caller picks fetch size and pagination.
    pub fn find_by_owner(
        &self,
        kind: impl Into<Kind>,
        owner: &impl OwnerRef,
    ) -> Result<Query, OwnershipError> {
        let key = owner.owner_key().ok_or(OwnershipError::MissingKey)?;
        Ok(Query::new(kind).eq(self.property.as_str(), key.to_value()))
    }

    fn check_kind(&self, key: &Key) -> Result<(), OwnershipError> {
        match &self.owner_kind {
            Some(expected) if key.kind() != expected => Err(OwnershipError::WrongKind {
                expected: expected.clone(),
                got: key.kind().clone(),
            }),
            _ => Ok(()),
        }
    }
}

impl PreSaveHook for Ownership {
    fn name(&self) -> &str {
        "ownership"
    }

    fn before_put(&self, entity: &mut Entity) -> StorageResult<()> {
        let reject = |reason: String| StorageError::Hook {
            hook: "ownership".to_string(),
            reason,
        };
        let key = self
            .owner_of(entity)
            .map_err(|e| reject(e.to_string()))?
            .ok_or_else(|| reject(format!("{} is required", self.property)))?;
        self.check_kind(&key).map_err(|e| reject(e.to_string()))
    }
}
