//! The validation engine.

use crate::{Entity, FieldError, Validator, ValidationError, ValidationSchema};
use docguard_props::BadValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Runs every validator in `schema` against `entity`.
///
/// All fields are checked in one pass; a failing field never stops the
/// others from running, so the error lists every violation at once. On
/// success the returned map holds a cleaned value for every schema field.
/// The entity is not modified; see [`Entity::clean_and_populate`].
pub fn clean(
    entity: &Entity,
    schema: &ValidationSchema,
) -> Result<Map<String, Value>, ValidationError> {
    let mut cleaned = Map::new();
    let mut errors = BTreeMap::new();

    for (name, validator) in schema.fields() {
        match validator.clean(entity.get(name)) {
            Ok(value) => {
                cleaned.insert(name.to_string(), value);
            }
            Err(error) => {
                errors.insert(
                    name.to_string(),
                    FieldError {
                        field: name.to_string(),
                        error,
                    },
                );
            }
        }
    }

    match ValidationError::from_errors(errors) {
        Some(err) => {
            debug!("{} rejected: {} field(s) failed", entity.kind, err.len());
            Err(err)
        }
        None => Ok(cleaned),
    }
}

/// Rewrites every schema field present on `entity` into its stored form.
///
/// Fields absent from the entity stay absent. Like [`clean`], every field
/// is converted before failures are reported, and the entity is left
/// untouched if any field fails.
pub fn encode(entity: &mut Entity, schema: &ValidationSchema) -> Result<(), ValidationError> {
    convert(entity, schema, |v, value| v.to_stored(value))
}

/// Reverses [`encode`] on an entity read back from a store.
pub fn decode(entity: &mut Entity, schema: &ValidationSchema) -> Result<(), ValidationError> {
    convert(entity, schema, |v, value| v.from_stored(value))
}

fn convert<F>(entity: &mut Entity, schema: &ValidationSchema, f: F) -> Result<(), ValidationError>
where
    F: Fn(&dyn Validator, &Value) -> Result<Value, BadValue>,
{
    let mut converted = Map::new();
    let mut errors = BTreeMap::new();

    for (name, validator) in schema.fields() {
        let Some(value) = entity.get(name) else {
            continue;
        };
        match f(validator, value) {
            Ok(value) => {
                converted.insert(name.to_string(), value);
            }
            Err(error) => {
                errors.insert(
                    name.to_string(),
                    FieldError {
                        field: name.to_string(),
                        error,
                    },
                );
            }
        }
    }

    if let Some(err) = ValidationError::from_errors(errors) {
        return Err(err);
    }
    entity.populate(converted);
    Ok(())
}

impl Entity {
    /// Cleans against `schema` without modifying the entity.
    pub fn clean(&self, schema: &ValidationSchema) -> Result<Map<String, Value>, ValidationError> {
        clean(self, schema)
    }

    /// Cleans and writes the cleaned values back. Leaves the entity
    /// untouched when validation fails.
    pub fn clean_and_populate(&mut self, schema: &ValidationSchema) -> Result<(), ValidationError> {
        let cleaned = clean(self, schema)?;
        self.populate(cleaned);
        Ok(())
    }
}
