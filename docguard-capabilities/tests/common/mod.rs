#![allow(dead_code)]

use docguard_model::Entity;
use docguard_store::{DocumentStore, MemoryStore};
use docguard_types::Key;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Routes library logs to the test harness; `RUST_LOG=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Saves a fresh entity of `kind` with `data` and returns it.
pub fn create(store: &MemoryStore, kind: &str, data: Value) -> Entity {
    let mut e = Entity::new(kind).with_data(data);
    store.put(&mut e).unwrap();
    e
}

pub fn key_of(entity: &Entity) -> Key {
    entity.key.clone().expect("entity was saved")
}
