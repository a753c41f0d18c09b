use chrono::{DateTime, Utc};
use docguard_model::Entity;
use docguard_store::{PreSaveHook, StorageResult};
use docguard_types::timestamp::{from_millis, now_millis};
use serde::{Deserialize, Serialize};

/// Creation and update times, in milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timestamps {
    pub created: String,
    pub updated: String,
}

impl Default for Timestamps {
    fn default() -> Self {
        Self {
            created: "created".to_string(),
            updated: "updated".to_string(),
        }
    }
}

impl Timestamps {
    /// Sets `created` if it is not set yet, and `updated` always.
    pub fn stamp_at(&self, entity: &mut Entity, millis: i64) {
        if entity.get(&self.created).is_none_or(|v| v.is_null()) {
            entity.set(self.created.clone(), millis);
        }
        entity.set(self.updated.clone(), millis);
    }

    /// [`stamp_at`](Self::stamp_at) with the current wall-clock time.
    pub fn stamp(&self, entity: &mut Entity) {
        self.stamp_at(entity, now_millis());
    }

    #[must_use]
    pub fn created_at(&self, entity: &Entity) -> Option<DateTime<Utc>> {
        entity.get_i64(&self.created).and_then(from_millis)
    }

    #[must_use]
    pub fn updated_at(&self, entity: &Entity) -> Option<DateTime<Utc>> {
        entity.get_i64(&self.updated).and_then(from_millis)
    }
}

impl PreSaveHook for Timestamps {
    fn name(&self) -> &str {
        "timestamps"
    }

    fn before_put(&self, entity: &mut Entity) -> StorageResult<()> {
        self.stamp(entity);
        Ok(())
    }
}
