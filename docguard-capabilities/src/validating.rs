use docguard_model::{Entity, ValidationSchema};
use docguard_store::{PreSaveHook, StorageResult};

/// Cleans an entity against its schema before every write and writes the
/// cleaned values back. A validation failure aborts the write with the full
/// per-field error.
///
/// Also owns the stored form of the schema fields: the written copy holds
/// each validator's stored value (a decimal's scaled integer) and reads
/// decode it again. When disabled, values pass through unchanged both ways.
#[derive(Debug, Clone)]
pub struct ValidateOnPut {
    schema: ValidationSchema,
    enabled: bool,
}

impl ValidateOnPut {
    #[must_use]
    pub fn new(schema: ValidationSchema) -> Self {
        Self {
            schema,
            enabled: true,
        }
    }

    /// Turns validation on save on or off.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl PreSaveHook for ValidateOnPut {
    fn name(&self) -> &str {
        "validate"
    }

    fn before_put(&self, entity: &mut Entity) -> StorageResult<()> {
        if !self.enabled {
            return Ok(());
        }
        entity.clean_and_populate(&self.schema)?;
        Ok(())
    }

    fn encode(&self, entity: &mut Entity) -> StorageResult<()> {
        if self.enabled {
            docguard_model::encode(entity, &self.schema)?;
        }
        Ok(())
    }

    fn decode(&self, entity: &mut Entity) -> StorageResult<()> {
        if self.enabled {
            docguard_model::decode(entity, &self.schema)?;
        }
        Ok(())
    }
}
