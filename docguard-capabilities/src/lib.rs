//! Entity capabilities for docguard.
//!
//! Each capability is a small, independent value an entity type opts into
//! at registration. None of them calls another; they only talk to the
//! [`DocumentStore`](docguard_store::DocumentStore).
//!
//! - [`AncestryUniqueness`] / [`PropertyUniqueness`]: advisory uniqueness
//!   checks; the caller decides when to check and whether to raise
//! - [`Ownership`]: links an entity to an owner key and filters by owner
//! - [`RandomSampler`]: random ordinal on every save, approximate random pick
//! - [`Timestamps`]: creation and update times
//! - [`ValidateOnPut`]: runs a validation schema before every write
//!
//! [`EntityRegistration`] bundles the save-time ones into a hook chain.
//!
//! # Concurrency
//!
//! Uniqueness checks are check-then-act. Between `is_unique` returning true
//! and the caller's write, a concurrent writer can insert the same entity.
//! The property strategy is always exposed to this race. The ancestry
//! strategy narrows it (its check is a strongly consistent key lookup) but
//! only closes it when paired with a transactional create at that exact key,
//! which is the store's responsibility. Random sampling may read an ordinal
//! that a concurrent save is re-randomizing; sampling tolerates that.

mod error;
mod ownership;
mod random;
mod registration;
mod timestamps;
mod uniqueness;
mod validating;

pub use error::{DuplicateEntity, OwnershipError, UniquenessError};
pub use ownership::{OwnerRef, Ownership};
pub use random::{MAX_RAND, RandomSampler, SAMPLE_SIZE, SamplingConfig};
pub use registration::EntityRegistration;
pub use timestamps::Timestamps;
pub use uniqueness::{AncestryUniqueness, PropertyUniqueness, UniquenessStrategy};
pub use validating::ValidateOnPut;
