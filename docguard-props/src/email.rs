use crate::coercer::{non_empty_str, stored_str};
use crate::{BadValue, BadValueKind, Coercer};
use regex_lite::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\w!#$%&'*+/=?^`{|}~.-]+@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}$",
    )
    .expect("email pattern compiles")
});

/// Email address property.
///
/// Input is always trimmed and lower-cased before validation, so the stored
/// form is normalized even when the caller passed mixed case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Email;

impl Email {
    /// Normalizes without validating.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }
}

impl Coercer for Email {
    type Output = String;

    fn coerce(&self, raw: Option<&Value>) -> Result<Option<String>, BadValue> {
        let Some(s) = non_empty_str(raw, "an email string")? else {
            return Ok(None);
        };
        let normalized = Self::normalize(s);
        if normalized.is_empty() {
            return Ok(None);
        }
        if normalized.contains('@') && EMAIL_RE.is_match(&normalized) {
            return Ok(Some(normalized));
        }
        let message = if normalized.contains('@') {
            format!("The email address '{normalized}' is not valid")
        } else {
            "An email address must contain a single @".to_string()
        };
        Err(BadValue::new(BadValueKind::InvalidEmail, s, message))
    }

    fn to_stored(&self, value: &String) -> Result<Value, BadValue> {
        Ok(Value::String(value.clone()))
    }

    fn from_stored(&self, stored: &Value) -> Result<String, BadValue> {
        stored_str(stored)
    }
}
