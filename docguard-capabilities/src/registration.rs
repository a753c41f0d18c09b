//! Composition of save-time capabilities for one entity type.

use crate::{Ownership, RandomSampler, Timestamps, ValidateOnPut};
use docguard_model::{EntityType, ValidationSchema};
use docguard_store::{HookChain, HookRegistry};
use docguard_types::Kind;
use tracing::debug;

/// The capabilities an entity type opts into, fixed at registration.
///
/// Hooks are installed in a fixed order regardless of the order the
/// builder methods were called in: validation first (so later hooks see
/// cleaned values), then the ownership check, then timestamps, then the
/// random ordinal.
#[derive(Debug, Clone)]
pub struct EntityRegistration {
    entity_type: EntityType,
    validation: Option<ValidateOnPut>,
    ownership: Option<Ownership>,
    timestamps: Option<Timestamps>,
    random: Option<RandomSampler>,
}

impl EntityRegistration {
    #[must_use]
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            validation: None,
            ownership: None,
            timestamps: None,
            random: None,
        }
    }

    #[must_use]
    pub fn validate(mut self, schema: ValidationSchema) -> Self {
        self.validation = Some(ValidateOnPut::new(schema));
        self
    }

    #[must_use]
    pub fn ownership(mut self, ownership: Ownership) -> Self {
        self.ownership = Some(ownership);
        self
    }

    #[must_use]
    pub fn timestamps(mut self, timestamps: Timestamps) -> Self {
        self.timestamps = Some(timestamps);
        self
    }

    #[must_use]
    pub fn random(mut self, sampler: RandomSampler) -> Self {
        self.random = Some(sampler);
        self
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        self.entity_type.kind()
    }

    #[must_use]
    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    /// The pre-save chain these capabilities produce.
    #[must_use]
    pub fn hooks(&self) -> HookChain {
        let mut chain = HookChain::new();
        if let Some(v) = &self.validation {
            chain = chain.with(v.clone());
        }
        if let Some(o) = &self.ownership {
            chain = chain.with(o.clone());
        }
        if let Some(t) = &self.timestamps {
            chain = chain.with(t.clone());
        }
        if let Some(r) = &self.random {
            chain = chain.with(r.clone());
        }
        chain
    }

    /// Installs the chain into a store.
    pub fn install(&self, registry: &dyn HookRegistry) {
        let chain = self.hooks();
        debug!("registering {} with hooks {:?}", self.kind(), chain);
        chain.install(registry, self.kind());
    }
}
