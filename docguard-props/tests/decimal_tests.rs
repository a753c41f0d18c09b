use docguard_props::{BadValueKind, Coercer, Decimal, DecimalSpec, ScaledDecimal};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parses_integer_strings() {
    let v = ScaledDecimal::default();
    assert_eq!(v.parse(Some(&json!("12"))).unwrap(), Some(dec("12")));
}

#[test]
fn accepts_numbers_not_just_strings() {
    let v = ScaledDecimal::default();
    assert_eq!(v.coerce(Some(&json!(20))).unwrap(), Some(dec("20")));
    assert_eq!(v.coerce(Some(&json!(2.5))).unwrap(), Some(dec("2.5")));
}

#[test]
fn absent_is_valid() {
    let v = ScaledDecimal::default();
    assert_eq!(v.coerce(None).unwrap(), None);
    assert_eq!(v.coerce(Some(&Value::Null)).unwrap(), None);
    assert_eq!(v.coerce(Some(&json!(""))).unwrap(), None);
}

#[test]
fn non_numeric_text_names_the_input() {
    let v = ScaledDecimal::default();
    let err = v.coerce(Some(&json!("foo"))).unwrap_err();
    assert_eq!(err.kind, BadValueKind::NotANumber);
    assert_eq!(err.message, "foo is not a numeric value");
    assert_eq!(err.raw, json!("foo"));
}

#[test]
fn rejects_partial_numbers() {
    let v = ScaledDecimal::default();
    for raw in ["1.", ".5", "1e3", "+4", "1,5", "0x10"] {
        let err = v.coerce(Some(&json!(raw))).unwrap_err();
        assert_eq!(err.kind, BadValueKind::NotANumber, "{raw}");
    }
}

#[test]
fn rejects_booleans() {
    let v = ScaledDecimal::default();
    let err = v.coerce(Some(&json!(true))).unwrap_err();
    assert_eq!(err.kind, BadValueKind::NotANumber);
    assert_eq!(err.message, "true is not a numeric value");
}

// ── Range ────────────────────────────────────────────────────────

#[test]
fn default_bounds() {
    let v = ScaledDecimal::default();
    let err = v.coerce(Some(&json!("-1"))).unwrap_err();
    assert_eq!(err.kind, BadValueKind::TooSmall);
    assert_eq!(err.message, "Number cannot be smaller than 0");
    assert_eq!(err.raw, json!("-1"));

    let err = v.coerce(Some(&json!("100000000000"))).unwrap_err();
    assert_eq!(err.kind, BadValueKind::TooLarge);
    assert_eq!(err.message, "Number cannot be larger than 999999999");
}

#[test]
fn custom_bounds_are_inclusive_and_reported() {
    let v = ScaledDecimal::default()
        .with_range(-1, 100_000_000_000i64)
        .unwrap();
    assert_eq!(v.coerce(Some(&json!("-1"))).unwrap(), Some(dec("-1")));
    assert_eq!(
        v.coerce(Some(&json!("100000000000"))).unwrap(),
        Some(dec("100000000000"))
    );

    let err = v.coerce(Some(&json!("-2"))).unwrap_err();
    assert_eq!(err.message, "Number cannot be smaller than -1");
    assert_eq!(err.detail, Some(json!({"min": "-1"})));
}

#[test]
fn with_range_rejects_inverted_bounds() {
    let err = ScaledDecimal::default().with_range(10, 1).unwrap_err();
    assert_eq!(err.kind, BadValueKind::Invalid);
    assert_eq!(err.message, "min 10 is greater than max 1");
}

#[test]
fn numbers_beyond_decimal_range_are_too_large() {
    let v = ScaledDecimal::default();
    let huge = "99999999999999999999999999999999";
    let err = v.coerce(Some(&json!(huge))).unwrap_err();
    assert_eq!(err.kind, BadValueKind::TooLarge);
    assert_eq!(err.message, "Number cannot be larger than 999999999");
    assert_eq!(err.raw, json!(huge));

    let err = v.coerce(Some(&json!(1e30))).unwrap_err();
    assert_eq!(err.kind, BadValueKind::TooLarge);
    assert_eq!(err.message, "Number cannot be larger than 999999999");
}

#[test]
fn negative_numbers_beyond_decimal_range_are_too_small() {
    let v = ScaledDecimal::default();
    let err = v
        .coerce(Some(&json!("-99999999999999999999999999999999")))
        .unwrap_err();
    assert_eq!(err.kind, BadValueKind::TooSmall);
    assert_eq!(err.message, "Number cannot be smaller than 0");

    let err = v.coerce(Some(&json!(-1e30))).unwrap_err();
    assert_eq!(err.kind, BadValueKind::TooSmall);
}

#[test]
fn excess_fraction_digits_round_instead_of_failing() {
    let v = ScaledDecimal::default();
    let raw = "1.0000000000000000000000000000001";
    assert_eq!(v.coerce(Some(&json!(raw))).unwrap(), Some(dec("1")));
}

// ── Scaling ──────────────────────────────────────────────────────

#[test]
fn to_internal_scales_by_precision() {
    let v = ScaledDecimal::default();
    assert_eq!(v.to_internal(dec("12")).unwrap(), 1200);
}

#[test]
fn to_external_divides_exactly() {
    let v = ScaledDecimal::default();
    assert_eq!(v.to_external(12), dec("0.12"));
}

#[test]
fn rounds_half_away_from_zero() {
    let v = ScaledDecimal::default();
    assert_eq!(v.to_internal(dec("2.438")).unwrap(), 244);
    assert_eq!(v.to_internal(dec("2.433")).unwrap(), 243);
    assert_eq!(v.to_internal(dec("2.445")).unwrap(), 245);
    assert_eq!(v.to_internal(dec("-2.445")).unwrap(), -245);
}

#[test]
fn coerce_then_store() {
    let v = ScaledDecimal::default();
    let stored = v.coerce_stored(Some(&json!("2.438"))).unwrap();
    assert_eq!(stored, json!(244));
    assert_eq!(v.from_stored(&stored).unwrap(), dec("2.44"));
}

#[test]
fn higher_precision_keeps_more_digits() {
    let v = ScaledDecimal::new(10).unwrap();
    let stored = v.coerce_stored(Some(&json!("2.4123"))).unwrap();
    assert_eq!(stored, json!(24_123_000_000i64));
    assert_eq!(v.from_stored(&stored).unwrap(), dec("2.4123"));
}

#[test]
fn overflowing_internal_form_is_rejected() {
    let v = ScaledDecimal::new(18).unwrap();
    let err = v.coerce(Some(&json!("999"))).unwrap_err();
    assert_eq!(err.kind, BadValueKind::Unrepresentable);
    assert_eq!(err.raw, json!("999"));
}

#[test]
fn precision_is_capped() {
    let err = ScaledDecimal::new(19).unwrap_err();
    assert_eq!(err.kind, BadValueKind::Unrepresentable);
}

#[test]
fn from_stored_requires_integer() {
    let v = ScaledDecimal::default();
    let err = v.from_stored(&json!("12")).unwrap_err();
    assert_eq!(err.kind, BadValueKind::WrongType);
}

#[test]
fn filter_value_accepts_strings_and_numbers() {
    let v = ScaledDecimal::default();
    assert_eq!(v.filter_value(&json!("12.2")).unwrap(), json!(1220));
    assert_eq!(v.filter_value(&json!(15)).unwrap(), json!(1500));
}

// ── Config ───────────────────────────────────────────────────────

#[test]
fn deserializes_with_defaults() {
    let v: ScaledDecimal = serde_json::from_value(json!({"precision": 4})).unwrap();
    assert_eq!(v.precision(), 4);
    assert_eq!(v.min(), Decimal::ZERO);
    assert_eq!(v.max(), Decimal::from(999_999_999));
}

#[test]
fn deserialize_rejects_inverted_range() {
    let result: Result<ScaledDecimal, _> = serde_json::from_value(json!({"min": "5", "max": "1"}));
    assert!(result.is_err());
}

#[test]
fn spec_default_matches_coercer_default() {
    let from_spec = ScaledDecimal::try_from(DecimalSpec::default()).unwrap();
    assert_eq!(from_spec, ScaledDecimal::default());
}
