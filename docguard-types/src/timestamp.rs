//! Wall-clock helpers.
//!
//! Timestamps are stored as milliseconds since the Unix epoch, the same unit
//! entity `created`/`updated` properties use.

use chrono::{DateTime, TimeZone, Utc};

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Converts stored milliseconds back into a UTC datetime.
/// Returns `None` when the value is outside chrono's representable range.
#[must_use]
pub fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
