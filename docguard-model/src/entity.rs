use docguard_types::{Key, Kind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// A document stored in the docguard entity layer.
///
/// `data` holds a JSON object of properties. `key` is `None` until the
/// store assigns one on first put; `parent` names the ancestor the key will
/// be allocated under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub key: Option<Key>,
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Key>,
    pub data: Value,
}

impl Entity {
    /// Creates an unsaved entity with no properties.
    pub fn new(kind: impl Into<Kind>) -> Self {
        Self {
            key: None,
            kind: kind.into(),
            parent: None,
            data: Value::Object(Map::new()),
        }
    }

    /// Creates an entity with a caller-chosen key.
    /// Kind and parent are taken from the key.
    #[must_use]
    pub fn with_key(key: Key) -> Self {
        Self {
            kind: key.kind().clone(),
            parent: key.parent(),
            key: Some(key),
            data: Value::Object(Map::new()),
        }
    }

    /// Sets the ancestor the key will be allocated under.
    #[must_use]
    pub fn with_parent(mut self, parent: Key) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Replaces the property object.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// True once the store has assigned a key.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.key.is_some()
    }

    /// Reads a property. `None` means the property is absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Extract a string property.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Extract an integer property.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Extract a boolean property.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Writes a property, turning `data` into an object if it was not one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.object_mut().insert(name.into(), value.into());
        self
    }

    /// Removes a property, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.data.as_object_mut().and_then(|obj| obj.remove(name))
    }

    /// Writes every entry of `values` onto the entity.
    pub fn populate(&mut self, values: Map<String, Value>) -> &mut Self {
        let obj = self.object_mut();
        for (name, value) in values {
            obj.insert(name, value);
        }
        self
    }

    fn object_mut(&mut self) -> &mut Map<String, Value> {
        if !self.data.is_object() {
            self.data = Value::Object(Map::new());
        }
        match &mut self.data {
            Value::Object(obj) => obj,
            _ => unreachable!("data was just replaced with an object"),
        }
    }
}

/// The declared shape of one entity kind.
///
/// Registered once; validation schemas are checked against it so a typo in
/// a field name fails at registration instead of silently never running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    kind: Kind,
    properties: BTreeSet<String>,
}

impl EntityType {
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
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(String::as_str)
    }

    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains(name)
    }

    /// Creates an empty, unsaved entity of this kind.
    #[must_use]
    pub fn new_entity(&self) -> Entity {
        Entity::new(self.kind.clone())
    }
}
