//! Pre-save hooks.
//!
//! Hooks run in registration order on a staged copy of the entity. The
//! first error aborts the chain.
//!
//! A hook may also own the stored form of some properties: `encode` runs on
//! the copy that is written, after every `before_put`, and `decode` runs on
//! every entity read back, in reverse order. The caller only ever sees the
//! decoded form.

use crate::StorageResult;
use docguard_model::Entity;
use docguard_types::Kind;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A callback the store runs before every write of a kind.
pub trait PreSaveHook: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Inspects or mutates the entity about to be written.
    fn before_put(&self, entity: &mut Entity) -> StorageResult<()>;

    /// Converts the entity to its stored form.
    fn encode(&self, _entity: &mut Entity) -> StorageResult<()> {
        Ok(())
    }

    /// Converts a stored entity back to the form callers see.
    fn decode(&self, _entity: &mut Entity) -> StorageResult<()> {
        Ok(())
    }
}

/// A store that accepts per-kind pre-save hooks.
pub trait HookRegistry {
    /// Appends `hook` to the chain for `kind`.
    fn register_hook(&self, kind: Kind, hook: Arc<dyn PreSaveHook>);
}

/// Ordered list of pre-save hooks.
#[derive(Clone, Default)]
pub struct HookChain {
    hooks: Vec<Arc<dyn PreSaveHook>>,
}

impl HookChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hook; it runs after every hook already in the chain.
    pub fn push(&mut self, hook: Arc<dyn PreSaveHook>) {
        self.hooks.push(hook);
    }

    #[must_use]
    pub fn with(mut self, hook: impl PreSaveHook + 'static) -> Self {
        self.push(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Registers every hook, in order, with `registry` for `kind`.
    pub fn install(&self, registry: &dyn HookRegistry, kind: &Kind) {
        for hook in &self.hooks {
            registry.register_hook(kind.clone(), Arc::clone(hook));
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hooks.iter().map(|h| h.name())
    }

    /// Runs every hook in order against `entity`.
    pub fn run(&self, entity: &mut Entity) -> StorageResult<()> {
        for hook in &self.hooks {
            debug!("running pre-save hook {} on {}", hook.name(), entity.kind);
            hook.before_put(entity)?;
        }
        Ok(())
    }

    /// Encodes `entity` for storage, hooks in order.
    pub fn encode(&self, entity: &mut Entity) -> StorageResult<()> {
        self.hooks.iter().try_for_each(|hook| hook.encode(entity))
    }

    /// Decodes a stored entity, hooks in reverse order.
    pub fn decode(&self, entity: &mut Entity) -> StorageResult<()> {
        self.hooks.iter().rev().try_for_each(|hook| hook.decode(entity))
    }
}

impl fmt::Debug for HookChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
