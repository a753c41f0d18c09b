//! Error types for schema registration and validation.

use docguard_props::BadValue;
use docguard_types::Kind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A schema was declared against fields its entity type does not have.
/// These are programming errors and surface at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("{kind} has no property named {field}")]
    UnknownField { kind: Kind, field: String },

    #[error("validator for {field} registered twice on {kind}")]
    DuplicateField { kind: Kind, field: String },
}

/// One field's validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{field}: {error}")]
pub struct FieldError {
    pub field: String,
    #[source]
    pub error: BadValue,
}

/// Every field that failed in one `clean` pass, keyed by field name.
///
/// Never empty: the only constructor returns `None` for an empty map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    message: String,
    errors: BTreeMap<String, FieldError>,
}

impl ValidationError {
    pub const MESSAGE: &'static str = "Invalid data";

    /// Wraps per-field errors, or returns `None` if there are none.
    #[must_use]
    pub fn from_errors(errors: BTreeMap<String, FieldError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        Some(Self {
            message: Self::MESSAGE.to_string(),
            errors,
        })
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, FieldError> {
        &self.errors
    }

    /// The failure recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Names of the failing fields, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn into_errors(self) -> BTreeMap<String, FieldError> {
        self.errors
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for (i, err) in self.errors.values().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
