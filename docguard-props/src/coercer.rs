use crate::BadValue;
use serde_json::Value;

/// Converts between a raw external value and a normalized internal one.
///
/// `coerce` returning `Ok(None)` means the value is valid and absent.
/// The stored form is what lands in the entity's data; `from_stored` reads
/// it back.
pub trait Coercer: Send + Sync {
    type Output;

    /// Validates and normalizes a raw value.
    fn coerce(&self, raw: Option<&Value>) -> Result<Option<Self::Output>, BadValue>;

    /// Encodes a coerced value for storage.
    fn to_stored(&self, value: &Self::Output) -> Result<Value, BadValue>;

    /// Decodes a stored value.
    fn from_stored(&self, stored: &Value) -> Result<Self::Output, BadValue>;

    /// Coerces and encodes in one step. Absent values become `null`.
    fn coerce_stored(&self, raw: Option<&Value>) -> Result<Value, BadValue> {
        match self.coerce(raw)? {
            Some(value) => self.to_stored(&value),
            None => Ok(Value::Null),
        }
    }
}

/// Returns the string payload of a raw value, or `None` when the value is
/// absent (missing, `null`, or empty).
pub(crate) fn non_empty_str<'a>(
    raw: Option<&'a Value>,
    expected: &str,
) -> Result<Option<&'a str>, BadValue> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(BadValue::wrong_type(other, expected)),
    }
}

pub(crate) fn stored_str(stored: &Value) -> Result<String, BadValue> {
    stored
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BadValue::wrong_type(stored, "a stored string"))
}
