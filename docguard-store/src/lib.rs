//! Document store interface for docguard.
//!
//! The constraint layer only ever issues get/put/query/count operations
//! against a [`DocumentStore`]. This crate defines that interface, the
//! [`Query`] model it accepts, and the ordered [`PreSaveHook`] chain a
//! store runs before every physical write.
//!
//! # Architecture
//!
//! - Side effects that happen on save (validation, timestamps, random
//!   ordinals) are explicit hooks registered per kind, run in order
//! - A failing hook aborts the write and leaves the caller's entity as it was
//! - [`MemoryStore`] is a complete reference implementation used by tests
//!   and by applications that embed the library without a backend

mod cursor;
mod error;
mod hook;
mod memory;
mod query;
mod store;

pub use cursor::Cursor;
pub use error::{StorageError, StorageResult};
pub use hook::{HookChain, HookRegistry, PreSaveHook};
pub use memory::MemoryStore;
pub use query::{Filter, FilterOp, Order, Query, compare_values};
pub use store::DocumentStore;
