//! Random ordinals and approximate random sampling.
//!
//! Every save draws a fresh ordinal uniformly from `[0, max_rand]`, on
//! updates as well as inserts. To pick an entity, a threshold is drawn from
//! the same range, up to `sample_size` entities with a higher ordinal are
//! fetched in ordinal order, and one of those is chosen uniformly.
//!
//! This is not a uniform draw over the population. Entities just above a
//! gap in the ordinal range are over-represented, small collections are
//! worse, and a threshold above every stored ordinal yields no sample at
//! all. Re-randomizing on each save keeps any one entity from staying in a
//! favoured position, but does not remove the bias. Use an indexed
//! random-offset read if a uniform pick is actually required.

use docguard_model::Entity;
use docguard_store::{DocumentStore, Filter, Order, PreSaveHook, Query, StorageResult};
use docguard_types::Kind;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Upper bound (inclusive) of the ordinal range.
pub const MAX_RAND: i64 = 999_999_999_999;
/// Entities fetched above the threshold before choosing.
pub const SAMPLE_SIZE: usize = 10;

/// Tunables for [`RandomSampler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub sample_size: usize,
    pub max_rand: i64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_size: SAMPLE_SIZE,
            max_rand: MAX_RAND,
        }
    }
}

/// Random-ordinal capability for one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSampler {
    /// Property holding the ordinal.
    pub property: String,
    pub config: SamplingConfig,
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self {
            property: "random_id".to_string(),
            config: SamplingConfig::default(),
        }
    }
}

impl RandomSampler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: SamplingConfig) -> Self {
        self.config = config;
        self
    }

    /// Draws an ordinal uniformly from `[0, max_rand]`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.gen_range(0..=self.config.max_rand)
    }

    /// Assigns a fresh ordinal to `entity` and returns it.
    pub fn randomize<R: Rng + ?Sized>(&self, entity: &mut Entity, rng: &mut R) -> i64 {
        let ordinal = self.generate(rng);
        entity.set(self.property.clone(), ordinal);
        ordinal
    }

    /// The ordinal currently stored on `entity`.
    #[must_use]
    pub fn ordinal(&self, entity: &Entity) -> Option<i64> {
        entity.get_i64(&self.property)
    }

    /// Entities of `kind` with an ordinal above `threshold`, lowest first,
    /// capped at the sample size.
    pub fn sample_query(&self, kind: impl Into<Kind>, threshold: i64) -> Query {
        Query::new(kind)
            .filter(Filter::gt(self.property.as_str(), threshold))
            .order_by(Order::Asc(self.property.clone()))
            .limit(self.config.sample_size)
    }

    /// Picks an entity of `kind` using `rng`.
    ///
    /// Returns `None` when nothing lies above the drawn threshold, which
    /// always happens for an empty kind and can happen for a small one.
    pub fn sample_with<S, R>(
        &self,
        store: &S,
        kind: impl Into<Kind>,
        rng: &mut R,
    ) -> StorageResult<Option<Entity>>
    where
        S: DocumentStore + ?Sized,
        R: Rng + ?Sized,
    {
        let kind = kind.into();
        let threshold = self.generate(rng);
        let query = self.sample_query(kind.clone(), threshold);
        let sample = store.fetch(&query, self.config.sample_size)?;
        if sample.is_empty() {
            warn!("random sample of {kind} above {threshold} is empty");
            return Ok(None);
        }
        debug!("random sample of {kind} above {threshold}: {} candidate(s)", sample.len());
        Ok(sample.choose(rng).cloned())
    }

    /// Picks an entity of `kind` using the thread-local generator.
    pub fn sample<S>(&self, store: &S, kind: impl Into<Kind>) -> StorageResult<Option<Entity>>
    where
        S: DocumentStore + ?Sized,
    {
        self.sample_with(store, kind, &mut rand::thread_rng())
    }
}

impl PreSaveHook for RandomSampler {
    fn name(&self) -> &str {
        "random"
    }

    fn before_put(&self, entity: &mut Entity) -> StorageResult<()> {
        self.randomize(entity, &mut rand::thread_rng());
        Ok(())
    }
}
