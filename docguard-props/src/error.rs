//! Error type for a single rejected property value.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Why a raw value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadValueKind {
    NotANumber,
    TooSmall,
    TooLarge,
    PatternMismatch,
    InvalidEmail,
    WrongType,
    Unrepresentable,
    /// Raised by caller-supplied validators.
    Invalid,
}

/// A single field's raw value failed coercion or validation.
///
/// Always carries the raw input and a human-readable reason. `detail` holds
/// optional structured context (the violated pattern, the configured bound).
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{message}")]
pub struct BadValue {
    pub kind: BadValueKind,
    pub raw: Value,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl BadValue {
    /// Creates a bad-value error without structured detail.
    pub fn new(kind: BadValueKind, raw: impl Into<Value>, message: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// Shorthand for errors raised by application validators.
    pub fn invalid(raw: impl Into<Value>, message: impl Into<String>) -> Self {
        Self::new(BadValueKind::Invalid, raw, message)
    }

    /// Attaches structured detail.
    #[must_use]
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub(crate) fn wrong_type(raw: &Value, expected: &str) -> Self {
        Self::new(
            BadValueKind::WrongType,
            raw.clone(),
            format!("expected {expected}, got {}", type_name(raw)),
        )
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
