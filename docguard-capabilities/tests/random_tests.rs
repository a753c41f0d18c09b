mod common;

use common::{create, init_tracing};
use docguard_capabilities::{MAX_RAND, RandomSampler, SAMPLE_SIZE, SamplingConfig};
use docguard_model::Entity;
use docguard_store::{DocumentStore, MemoryStore, Order};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use std::collections::HashSet;

fn random_store(kind: &str) -> MemoryStore {
    MemoryStore::new().with_hook(kind, RandomSampler::new())
}

// ── Ordinals ─────────────────────────────────────────────────────

#[test]
fn default_config() {
    let sampler = RandomSampler::new();
    assert_eq!(sampler.property, "random_id");
    assert_eq!(sampler.config.max_rand, MAX_RAND);
    assert_eq!(sampler.config.sample_size, SAMPLE_SIZE);
    assert_eq!(MAX_RAND, 999_999_999_999);
    assert_eq!(SAMPLE_SIZE, 10);
}

#[test]
fn generate_stays_in_range() {
    let sampler = RandomSampler::new().with_config(SamplingConfig {
        sample_size: 3,
        max_rand: 5,
    });
    let mut rng = StdRng::seed_from_u64(1);
    let seen: HashSet<i64> = (0..500).map(|_| sampler.generate(&mut rng)).collect();
    assert!(seen.iter().all(|n| (0..=5).contains(n)));
    // Both ends of the inclusive range are reachable.
    assert!(seen.contains(&0));
    assert!(seen.contains(&5));
}

#[test]
fn randomize_sets_property() {
    let sampler = RandomSampler::new();
    let mut entity = Entity::new("TestRandom");
    let n = sampler.randomize(&mut entity, &mut StdRng::seed_from_u64(3));
    assert_eq!(sampler.ordinal(&entity), Some(n));
}

#[test]
fn saves_assign_distinct_ordinals() {
    init_tracing();
    let store = random_store("TestRandom");
    let sampler = RandomSampler::new();
    let ordinals: HashSet<i64> = (0..3)
        .map(|_| {
            let e = create(&store, "TestRandom", json!({}));
            sampler.ordinal(&e).unwrap()
        })
        .collect();
    assert_eq!(ordinals.len(), 3);
}

#[test]
fn resave_rerandomizes() {
    let store = random_store("TestRandom");
    let sampler = RandomSampler::new();
    let mut entity = Entity::new("TestRandom");
    store.put(&mut entity).unwrap();
    let first = sampler.ordinal(&entity).unwrap();
    store.put(&mut entity).unwrap();
    let second = sampler.ordinal(&entity).unwrap();
    assert_ne!(first, second);
}

// ── Sampling ─────────────────────────────────────────────────────

#[test]
fn sample_query_shape() {
    let sampler = RandomSampler::new();
    let q = sampler.sample_query("TestRandom", 42);
    assert_eq!(q.filters.len(), 1);
    assert_eq!(q.filters[0].value, json!(42));
    assert_eq!(q.order, vec![Order::Asc("random_id".to_string())]);
    assert_eq!(q.limit, Some(SAMPLE_SIZE));
}

#[test]
fn empty_kind_samples_none() {
    let store = MemoryStore::new();
    let sampler = RandomSampler::new();
    assert_eq!(sampler.sample(&store, "Nothing").unwrap(), None);
}

#[test]
fn sample_returns_entity_of_kind() {
    let store = random_store("TestRandom");
    for _ in 0..50 {
        create(&store, "TestRandom", json!({}));
    }
    create(&store, "Other", json!({"random_id": 1}));

    let sampler = RandomSampler::new();
    let mut rng = StdRng::seed_from_u64(11);
    let picked: Vec<Entity> = (0..20)
        .filter_map(|_| sampler.sample_with(&store, "TestRandom", &mut rng).unwrap())
        .collect();
    assert!(!picked.is_empty());
    assert!(picked.iter().all(|e| e.kind == "TestRandom"));
}

#[test]
fn repeated_samples_vary() {
    let store = random_store("TestRandom");
    for _ in 0..200 {
        create(&store, "TestRandom", json!({}));
    }
    let sampler = RandomSampler::new();
    let keys: HashSet<_> = (0..20)
        .filter_map(|_| sampler.sample(&store, "TestRandom").unwrap())
        .filter_map(|e| e.key)
        .collect();
    assert!(keys.len() > 1);
}

#[test]
fn threshold_above_every_ordinal_yields_none() {
    let store = MemoryStore::new();
    create(&store, "TestRandom", json!({"random_id": 0}));
    // Any threshold drawn from [0, 0] leaves nothing strictly above it.
    let sampler = RandomSampler::new().with_config(SamplingConfig {
        sample_size: 10,
        max_rand: 0,
    });
    assert_eq!(sampler.sample(&store, "TestRandom").unwrap(), None);
}

#[test]
fn sampling_favours_entities_after_gaps() {
    // Ordinals are set by hand (no hook): 10 and 90 in [0, 99], one fetched
    // per draw. Thresholds below 10 pick the first, 10..90 pick the second,
    // 90 and above pick nothing.
    let store = MemoryStore::new();
    let low = create(&store, "TestRandom", json!({"random_id": 10}));
    let high = create(&store, "TestRandom", json!({"random_id": 90}));
    let sampler = RandomSampler::new().with_config(SamplingConfig {
        sample_size: 1,
        max_rand: 99,
    });

    let mut rng = StdRng::seed_from_u64(2024);
    let (mut lows, mut highs, mut misses) = (0, 0, 0);
    for _ in 0..1000 {
        match sampler.sample_with(&store, "TestRandom", &mut rng).unwrap() {
            Some(e) if e.key == low.key => lows += 1,
            Some(e) if e.key == high.key => highs += 1,
            Some(_) => unreachable!(),
            None => misses += 1,
        }
    }
    assert!(highs > 3 * lows, "lows={lows} highs={highs}");
    assert!(misses > 0);
}

#[test]
fn config_deserializes_with_defaults() {
    let sampler: RandomSampler =
        serde_json::from_value(json!({"config": {"sample_size": 5}})).unwrap();
    assert_eq!(sampler.property, "random_id");
    assert_eq!(
        sampler.config,
        SamplingConfig {
            sample_size: 5,
            max_rand: MAX_RAND
        }
    );
}
