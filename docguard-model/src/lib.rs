//! Core entity model for docguard.
//!
//! Defines the types the constraint layer works on:
//! - [`Entity`]: a kind, an optional key, and a JSON object of properties
//! - [`EntityType`]: the declared property names of one kind
//! - [`Validator`]: turns a raw property value into a cleaned one
//! - [`ValidationSchema`]: the validators of one entity type, by field
//! - [`clean`]: runs a schema against an entity, collecting every failure
//! - [`encode`] / [`decode`]: convert schema fields to and from their stored form
//!
//! Coercers from `docguard-props` are validators out of the box; any
//! closure with the right signature can be registered too.

mod clean;
mod entity;
mod error;
mod schema;
mod validator;

pub use clean::{clean, decode, encode};
pub use entity::{Entity, EntityType};
pub use error::{FieldError, SchemaError, ValidationError};
pub use schema::{ValidationSchema, ValidationSchemaBuilder};
pub use validator::Validator;
