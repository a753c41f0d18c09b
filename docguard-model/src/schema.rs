use crate::{EntityType, SchemaError, Validator};
use docguard_props::BadValue;
use docguard_types::Kind;
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::sync::Arc;

/// Validators for the fields of one entity type.
///
/// Built once per type at registration and shared afterwards; cloning is
/// cheap. Fields are visited in name order.
#[derive(Clone)]
pub struct ValidationSchema {
    kind: Kind,
    fields: BTreeMap<String, Arc<dyn Validator>>,
}

impl ValidationSchema {
    /// Starts a schema for `entity_type`.
    #[must_use]
    pub fn builder(entity_type: &EntityType) -> ValidationSchemaBuilder {
        ValidationSchemaBuilder {
            entity_type: entity_type.clone(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// `(field, validator)` pairs in field-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &dyn Validator)> {
        self.fields.iter().map(|(name, v)| (name.as_str(), v.as_ref()))
    }

    #[must_use]
    pub fn validator(&self, field: &str) -> Option<&dyn Validator> {
        self.fields.get(field).map(|v| v.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for ValidationSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationSchema")
            .field("kind", &self.kind)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder returned by [`ValidationSchema::builder`].
pub struct ValidationSchemaBuilder {
    entity_type: EntityType,
    fields: BTreeMap<String, Arc<dyn Validator>>,
}

impl fmt::Debug for ValidationSchemaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationSchemaBuilder")
            .field("kind", self.entity_type.kind())
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ValidationSchemaBuilder {
    /// Registers a validator for `name`, which must be a declared property.
    pub fn field(
        mut self,
        name: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        if !self.entity_type.has_property(&name) {
            return Err(SchemaError::UnknownField {
                kind: self.entity_type.kind().clone(),
                field: name,
            });
        }
        match self.fields.entry(name) {
            Entry::Occupied(e) => Err(SchemaError::DuplicateField {
                kind: self.entity_type.kind().clone(),
                field: e.key().clone(),
            }),
            Entry::Vacant(e) => {
                e.insert(Arc::new(validator));
                Ok(self)
            }
        }
    }

    /// Registers a closure as the validator for `name`.
    pub fn field_fn<F>(self, name: impl Into<String>, f: F) -> Result<Self, SchemaError>
    where
        F: Fn(Option<&Value>) -> Result<Value, BadValue> + Send + Sync + 'static,
    {
        self.field(name, f)
    }

    #[must_use]
    pub fn build(self) -> ValidationSchema {
        ValidationSchema {
            kind: self.entity_type.kind().clone(),
            fields: self.fields,
        }
    }
}
