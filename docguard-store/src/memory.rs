//! In-memory document store.
//!
//! Keeps entities in a `BTreeMap` ordered by key behind a mutex, in their
//! stored (encoded) form. Queries filter on the stored form, snapshot their
//! matches under the lock and hand back a cursor that decodes lazily, so a
//! cursor never observes writes made after it was created.

use crate::{
    Cursor, DocumentStore, HookChain, HookRegistry, PreSaveHook, Query, StorageError, StorageResult,
};
use docguard_model::Entity;
use docguard_types::{Identifier, Key, Kind};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::debug;

/// Reference [`DocumentStore`] backed by process memory.
#[derive(Default)]
pub struct MemoryStore {
    entities: Mutex<BTreeMap<Key, Entity>>,
    hooks: RwLock<HashMap<Kind, HookChain>>,
}

impl MemoryStore {
    /// Creates an empty store with no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pre-save hook for `kind` (builder form).
    /// Hooks run in registration order.
    #[must_use]
    pub fn with_hook(self, kind: impl Into<Kind>, hook: impl PreSaveHook + 'static) -> Self {
        self.register_hook(kind.into(), Arc::new(hook));
        self
    }

    /// The hook chain currently registered for `kind`.
    #[must_use]
    pub fn hooks_for(&self, kind: &Kind) -> HookChain {
        let hooks = self.hooks.read().unwrap_or_else(PoisonError::into_inner);
        hooks.get(kind).cloned().unwrap_or_default()
    }

    /// The entity at `key` exactly as stored, without decoding.
    #[must_use]
    pub fn get_stored(&self, key: &Key) -> Option<Entity> {
        self.entities().get(key).cloned()
    }

    /// Removes the entity at `key`, returning it if it existed.
    pub fn delete(&self, key: &Key) -> Option<Entity> {
        self.entities().remove(key)
    }

    /// Total number of stored entities, across kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities().is_empty()
    }

    fn entities(&self) -> MutexGuard<'_, BTreeMap<Key, Entity>> {
        // Writes are single map operations, so a poisoned map is still consistent.
        self.entities.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn select(&self, query: &Query) -> Vec<Entity> {
        let mut matched: Vec<Entity> = self
            .entities()
            .values()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();
        if !query.order.is_empty() {
            matched.sort_by(|a, b| query.compare(a, b));
        }
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        matched
    }
}

fn assign_key(entity: &Entity) -> StorageResult<Key> {
    match &entity.key {
        Some(key) if key.kind() != &entity.kind => Err(StorageError::InvalidData(format!(
            "key {key} does not match entity kind {}",
            entity.kind
        ))),
        Some(key) => Ok(key.clone()),
        None => {
            let id = Identifier::generate();
            let key = match &entity.parent {
                Some(parent) => parent.child(entity.kind.clone(), id)?,
                None => Key::root(entity.kind.clone(), id)?,
            };
            Ok(key)
        }
    }
}

impl HookRegistry for MemoryStore {
    fn register_hook(&self, kind: Kind, hook: Arc<dyn PreSaveHook>) {
        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
        hooks.entry(kind).or_default().push(hook);
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &Key) -> StorageResult<Option<Entity>> {
        let Some(mut entity) = self.get_stored(key) else {
            return Ok(None);
        };
        self.hooks_for(&entity.kind).decode(&mut entity)?;
        Ok(Some(entity))
    }

    fn put(&self, entity: &mut Entity) -> StorageResult<Key> {
        let hooks = self.hooks_for(&entity.kind);
        let mut staged = entity.clone();
        hooks.run(&mut staged)?;

        if !staged.data.is_object() {
            return Err(StorageError::InvalidData(format!(
                "{} data must be a JSON object",
                staged.kind
            )));
        }

        let key = assign_key(&staged)?;
        staged.parent = key.parent();
        staged.key = Some(key.clone());

        let mut stored = staged.clone();
        hooks.encode(&mut stored)?;

        let previous = self.entities().insert(key.clone(), stored);
        debug!(
            "{} entity {}",
            if previous.is_some() { "updated" } else { "created" },
            key
        );

        *entity = staged;
        Ok(key)
    }

    fn query(&self, query: &Query) -> StorageResult<Cursor> {
        let hooks = self.hooks_for(&query.kind);
        let matched = self.select(query);
        Ok(Cursor::new(matched.into_iter().map(move |mut entity| {
            hooks.decode(&mut entity)?;
            Ok(entity)
        })))
    }

    fn count(&self, query: &Query) -> StorageResult<usize> {
        Ok(self.select(query).len())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entities", &self.len())
            .finish_non_exhaustive()
    }
}
