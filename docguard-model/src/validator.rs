use docguard_props::{BadValue, Coercer, Email, ScaledDecimal, Slug};
use serde::Serialize;
use serde_json::Value;

/// Cleans a single raw property value.
///
/// `raw` is `None` when the property is absent from the entity. The
/// returned value is what gets written back onto the entity; absent values
/// conventionally clean to `null`. Cleaning an already cleaned value must
/// return it unchanged, since an entity is cleaned again on every save.
///
/// The stored form only exists inside the store: `to_stored` runs on the
/// copy being written and `from_stored` on every entity read back. Both are
/// the identity unless a validator overrides them.
pub trait Validator: Send + Sync {
    fn clean(&self, raw: Option<&Value>) -> Result<Value, BadValue>;

    /// Encodes a cleaned value for storage.
    fn to_stored(&self, cleaned: &Value) -> Result<Value, BadValue> {
        Ok(cleaned.clone())
    }

    /// Decodes a stored value back to its cleaned form.
    fn from_stored(&self, stored: &Value) -> Result<Value, BadValue> {
        Ok(stored.clone())
    }
}

impl<F> Validator for F
where
    F: Fn(Option<&Value>) -> Result<Value, BadValue> + Send + Sync,
{
    fn clean(&self, raw: Option<&Value>) -> Result<Value, BadValue> {
        self(raw)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, BadValue> {
    serde_json::to_value(value).map_err(|e| BadValue::invalid(Value::Null, e.to_string()))
}

// Entities carry the coercer's output (a decimal renders as "2.44"); only
// the store sees the stored form (244).
macro_rules! coercer_validator {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Validator for $ty {
                fn clean(&self, raw: Option<&Value>) -> Result<Value, BadValue> {
                    match self.coerce(raw)? {
                        Some(value) => to_json(&value),
                        None => Ok(Value::Null),
                    }
                }

                fn to_stored(&self, cleaned: &Value) -> Result<Value, BadValue> {
                    self.coerce_stored(Some(cleaned))
                }

                fn from_stored(&self, stored: &Value) -> Result<Value, BadValue> {
                    if stored.is_null() {
                        return Ok(Value::Null);
                    }
                    to_json(&Coercer::from_stored(self, stored)?)
                }
            }
        )+
    };
}

coercer_validator!(Slug, Email, ScaledDecimal);
