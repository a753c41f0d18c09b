use crate::{Cursor, Query, StorageError, StorageResult};
use docguard_model::Entity;
use docguard_types::Key;

/// The operations the constraint layer needs from a document store.
///
/// Implementations must be safe to share across threads; docguard adds no
/// locking of its own. Consistency, transactions and retries are the
/// store's business.
pub trait DocumentStore: Send + Sync {
    /// Point lookup by key. Strongly consistent.
    fn get(&self, key: &Key) -> StorageResult<Option<Entity>>;

    /// Runs the pre-save hooks for the entity's kind, then writes it.
    ///
    /// Assigns a key on first insert and preserves it on update. On success
    /// the caller's entity reflects the hooks' changes and carries its key;
    /// on failure it is left untouched. Hooks may encode properties for
    /// storage; the caller's entity keeps the decoded form, so putting it
    /// again is safe.
    fn put(&self, entity: &mut Entity) -> StorageResult<Key>;

    /// Lazily yields entities matching `query`. Filters compare against the
    /// stored form of each property.
    fn query(&self, query: &Query) -> StorageResult<Cursor>;

    /// Number of entities matching `query`.
    fn count(&self, query: &Query) -> StorageResult<usize>;

    /// Runs `query` and collects at most `limit` results.
    fn fetch(&self, query: &Query, limit: usize) -> StorageResult<Vec<Entity>> {
        self.query(query)?.take(limit).collect()
    }

    /// True if an entity exists at exactly `key`.
    fn exists(&self, key: &Key) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Like [`get`](Self::get) but a missing entity is an error.
    fn get_required(&self, key: &Key) -> StorageResult<Entity> {
        self.get(key)?
            .ok_or_else(|| StorageError::NotFound(key.clone()))
    }
}
