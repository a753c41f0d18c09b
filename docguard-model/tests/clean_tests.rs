use docguard_model::{Entity, EntityType, ValidationError, ValidationSchema, clean, decode, encode};
use docguard_props::{BadValue, BadValueKind, Email, ScaledDecimal, Slug};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn user_type() -> EntityType {
    EntityType::new("User", ["email", "handle", "balance", "name"])
}

fn user_schema() -> ValidationSchema {
    ValidationSchema::builder(&user_type())
        .field("email", Email)
        .unwrap()
        .field("handle", Slug)
        .unwrap()
        .field("balance", ScaledDecimal::default())
        .unwrap()
        .build()
}

fn user(data: Value) -> Entity {
    Entity::new("User").with_data(data)
}

// ── Success ──────────────────────────────────────────────────────

#[test]
fn returns_cleaned_map_for_every_field() {
    let e = user(json!({"email": " Foo@Test.COM ", "handle": "foo-1", "balance": "2.438"}));
    let cleaned = clean(&e, &user_schema()).unwrap();
    assert_eq!(
        Value::Object(cleaned),
        json!({"email": "foo@test.com", "handle": "foo-1", "balance": "2.44"})
    );
}

#[test]
fn cleaning_twice_changes_nothing() {
    let mut e = user(json!({"email": " Foo@Test.COM ", "handle": "foo-1", "balance": "2.438"}));
    e.clean_and_populate(&user_schema()).unwrap();
    let once = e.clone();
    e.clean_and_populate(&user_schema()).unwrap();
    assert_eq!(e, once);
    assert_eq!(e.get("balance"), Some(&json!("2.44")));
}

#[test]
fn absent_fields_clean_to_null() {
    let cleaned = clean(&user(json!({})), &user_schema()).unwrap();
    assert_eq!(cleaned.get("email"), Some(&Value::Null));
    assert_eq!(cleaned.len(), 3);
}

#[test]
fn clean_does_not_modify_entity() {
    let e = user(json!({"email": " A@B.COM "}));
    let before = e.clone();
    e.clean(&user_schema()).unwrap();
    assert_eq!(e, before);
}

#[test]
fn clean_and_populate_writes_back() {
    let mut e = user(json!({"email": " A@B.COM ", "name": "kept"}));
    e.clean_and_populate(&user_schema()).unwrap();
    assert_eq!(e.get_str("email"), Some("a@b.com"));
    assert_eq!(e.get_str("name"), Some("kept"));
}

#[test]
fn clean_and_populate_leaves_entity_on_failure() {
    let mut e = user(json!({"email": "nope", "handle": "Good"}));
    let before = e.clone();
    assert!(e.clean_and_populate(&user_schema()).is_err());
    assert_eq!(e, before);
}

// ── Failure aggregation ──────────────────────────────────────────

#[test]
fn two_failing_fields_are_both_reported() {
    let e = user(json!({"email": "not valid email", "handle": "bad slug", "balance": "1"}));
    let err = clean(&e, &user_schema()).unwrap_err();
    assert_eq!(err.fields().collect::<Vec<_>>(), vec!["email", "handle"]);
    assert_eq!(err.message(), "Invalid data");
    assert_eq!(err.get("email").unwrap().error.kind, BadValueKind::InvalidEmail);
    assert_eq!(err.get("handle").unwrap().error.kind, BadValueKind::PatternMismatch);
}

#[test]
fn every_field_runs_even_after_a_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let t = EntityType::new("Thing", ["a", "b", "c"]);
    let mut builder = ValidationSchema::builder(&t);
    for name in ["a", "b", "c"] {
        let calls = Arc::clone(&calls);
        builder = builder
            .field_fn(name, move |raw: Option<&Value>| {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BadValue::invalid(raw.cloned().unwrap_or(Value::Null), "always fails"))
            })
            .unwrap();
    }
    let err = clean(&Entity::new("Thing"), &builder.build()).unwrap_err();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(err.len(), 3);
}

#[test]
fn error_display_lists_fields() {
    let e = user(json!({"balance": "foo", "handle": "a b"}));
    let err = clean(&e, &user_schema()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid data: balance: foo is not a numeric value; handle: The input 'a b' is not a valid slug"
    );
}

#[test]
fn validation_error_is_never_empty() {
    assert!(ValidationError::from_errors(Default::default()).is_none());
}

#[test]
fn custom_validators_receive_absent_as_none() {
    let t = EntityType::new("Thing", ["required"]);
    let schema = ValidationSchema::builder(&t)
        .field_fn("required", |raw: Option<&Value>| match raw {
            None | Some(Value::Null) => Err(BadValue::invalid(Value::Null, "Please enter a value")),
            Some(v) => Ok(v.clone()),
        })
        .unwrap()
        .build();

    let err = clean(&Entity::new("Thing"), &schema).unwrap_err();
    assert_eq!(err.get("required").unwrap().error.message, "Please enter a value");

    let ok = clean(&Entity::new("Thing").with_data(json!({"required": 1})), &schema).unwrap();
    assert_eq!(ok.get("required"), Some(&json!(1)));
}

// ── Stored form ──────────────────────────────────────────────────

#[test]
fn encode_scales_decimals_and_decode_restores_them() {
    let mut e = user(json!({"email": "a@b.com", "balance": "2.44", "name": "kept"}));
    encode(&mut e, &user_schema()).unwrap();
    assert_eq!(e.data, json!({"email": "a@b.com", "balance": 244, "name": "kept"}));

    decode(&mut e, &user_schema()).unwrap();
    assert_eq!(e.data, json!({"email": "a@b.com", "balance": "2.44", "name": "kept"}));
}

#[test]
fn encode_skips_absent_fields_and_keeps_nulls() {
    let mut e = user(json!({"balance": null}));
    encode(&mut e, &user_schema()).unwrap();
    assert_eq!(e.data, json!({"balance": null}));
    decode(&mut e, &user_schema()).unwrap();
    assert_eq!(e.data, json!({"balance": null}));
}

#[test]
fn decode_reports_malformed_stored_values() {
    let mut e = user(json!({"balance": "not stored form", "handle": 7}));
    let before = e.clone();
    let err = decode(&mut e, &user_schema()).unwrap_err();
    assert_eq!(err.fields().collect::<Vec<_>>(), vec!["balance", "handle"]);
    assert_eq!(e, before);
}

#[test]
fn custom_validators_store_values_unchanged() {
    let t = EntityType::new("Thing", ["n"]);
    let schema = ValidationSchema::builder(&t)
        .field_fn("n", |raw: Option<&Value>| Ok(raw.cloned().unwrap_or(Value::Null)))
        .unwrap()
        .build();
    let mut e = Entity::new("Thing").with_data(json!({"n": 3}));
    encode(&mut e, &schema).unwrap();
    assert_eq!(e.get("n"), Some(&json!(3)));
}
