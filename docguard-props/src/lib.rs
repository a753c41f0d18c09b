//! Typed property coercers for docguard.
//!
//! A coercer converts a raw external value (string or number, as found in
//! an entity's JSON data) into a normalized internal value, validating it on
//! the way. Three coercers ship with the crate:
//! - [`Slug`]: word characters and hyphens only
//! - [`Email`]: trimmed, lower-cased, grammar-checked addresses
//! - [`ScaledDecimal`]: decimals stored as integers scaled by `10^precision`
//!
//! Every coercer treats a missing value as valid-and-absent; "required" is a
//! separate concern and not doubled up here.

mod coercer;
mod decimal;
mod email;
mod error;
mod slug;

pub use coercer::Coercer;
pub use decimal::{
    DEFAULT_MAX, DEFAULT_MIN, DEFAULT_PRECISION, DecimalSpec, MAX_PRECISION, ScaledDecimal,
};
pub use email::Email;
pub use error::{BadValue, BadValueKind};
pub use slug::Slug;

pub use rust_decimal::Decimal;
