use crate::coercer::{non_empty_str, stored_str};
use crate::{BadValue, BadValueKind, Coercer};
use regex_lite::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;

const SLUG_PATTERN: &str = r"^[\w-]+$";

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SLUG_PATTERN).expect("slug pattern compiles"));

/// URL-safe identifier: ASCII word characters and hyphens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slug;

impl Coercer for Slug {
    type Output = String;

    fn coerce(&self, raw: Option<&Value>) -> Result<Option<String>, BadValue> {
        let Some(s) = non_empty_str(raw, "a slug string")? else {
            return Ok(None);
        };
        if SLUG_RE.is_match(s) {
            Ok(Some(s.to_string()))
        } else {
            Err(BadValue::new(
                BadValueKind::PatternMismatch,
                s,
                format!("The input '{s}' is not a valid slug"),
            )
            .with_detail(json!({ "pattern": SLUG_PATTERN })))
        }
    }

    fn to_stored(&self, value: &String) -> Result<Value, BadValue> {
        Ok(Value::String(value.clone()))
    }

    fn from_stored(&self, stored: &Value) -> Result<String, BadValue> {
        stored_str(stored)
    }
}
