use crate::StorageResult;
use docguard_model::Entity;

/// Lazy, finite sequence of query results.
///
/// A cursor cannot be resumed after an error; restart by issuing the
/// query again.
pub struct Cursor {
    inner: Box<dyn Iterator<Item = StorageResult<Entity>> + Send>,
}

impl Cursor {
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = StorageResult<Entity>> + Send + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    /// Cursor over already-materialized results.
    #[must_use]
    pub fn from_vec(entities: Vec<Entity>) -> Self {
        Self::new(entities.into_iter().map(Ok))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Drains the cursor, stopping at the first error.
    pub fn collect_all(self) -> StorageResult<Vec<Entity>> {
        self.collect()
    }
}

impl Iterator for Cursor {
    type Item = StorageResult<Entity>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor").finish_non_exhaustive()
    }
}
