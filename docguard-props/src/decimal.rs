//! Fixed-point decimal property.
//!
//! Values are stored as `round(value × 10^precision)` in an `i64`, using
//! round-half-away-from-zero. Reading back divides by `10^precision`
//! exactly, so a value with at most `precision` fractional digits survives
//! the round trip unchanged and anything finer is rounded.

use crate::{BadValue, BadValueKind, Coercer};
use regex_lite::Regex;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Fractional digits kept by default.
pub const DEFAULT_PRECISION: u32 = 2;
/// Default lower bound (inclusive).
pub const DEFAULT_MIN: i64 = 0;
/// Default upper bound (inclusive).
pub const DEFAULT_MAX: i64 = 999_999_999;
/// Largest supported precision; `10^18` is the last power of ten an `i64` holds.
pub const MAX_PRECISION: u32 = 18;

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric pattern compiles"));

/// Declarative form of a [`ScaledDecimal`], e.g. loaded from JSON config.
/// Missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimalSpec {
    pub precision: u32,
    pub min: Decimal,
    pub max: Decimal,
}

impl Default for DecimalSpec {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            min: Decimal::from(DEFAULT_MIN),
            max: Decimal::from(DEFAULT_MAX),
        }
    }
}

/// Decimal coercer with a fixed precision and an inclusive range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DecimalSpec", into = "DecimalSpec")]
pub struct ScaledDecimal {
    precision: u32,
    min: Decimal,
    max: Decimal,
}

impl Default for ScaledDecimal {
    fn default() -> Self {
        let spec = DecimalSpec::default();
        Self {
            precision: spec.precision,
            min: spec.min,
            max: spec.max,
        }
    }
}

impl ScaledDecimal {
    /// Creates a coercer with the default range.
    pub fn new(precision: u32) -> Result<Self, BadValue> {
        Self::try_from(DecimalSpec {
            precision,
            ..DecimalSpec::default()
        })
    }

    /// Overrides the inclusive range. `min` must not exceed `max`.
    pub fn with_range(
        self,
        min: impl Into<Decimal>,
        max: impl Into<Decimal>,
    ) -> Result<Self, BadValue> {
        Self::try_from(DecimalSpec {
            precision: self.precision,
            min: min.into(),
            max: max.into(),
        })
    }

    #[must_use]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    #[must_use]
    pub fn min(&self) -> Decimal {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Decimal {
        self.max
    }

    /// Parses a raw value into a decimal without range checks.
    ///
    /// Strings must match `-?digits(.digits)?` after trimming; JSON numbers
    /// are accepted directly. Empty strings and `null` are absent. Numbers
    /// beyond what a `Decimal` holds are reported as out of range.
    pub fn parse(&self, raw: Option<&Value>) -> Result<Option<Decimal>, BadValue> {
        match raw {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                if !NUMERIC_RE.is_match(trimmed) {
                    return Err(not_a_number(s.as_str().into(), s));
                }
                // Fractional digits past what a Decimal keeps are rounded away;
                // only an oversized integer part fails here.
                Decimal::from_str_exact(trimmed)
                    .or_else(|_| trimmed.parse::<Decimal>())
                    .map(Some)
                    .map_err(|_| self.out_of_range(trimmed.starts_with('-'), s.as_str().into()))
            }
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Some(Decimal::from(i)));
                }
                if let Some(u) = n.as_u64() {
                    return Ok(Some(Decimal::from(u)));
                }
                let Some(f) = n.as_f64() else {
                    return Err(not_a_number(Value::Number(n.clone()), &n.to_string()));
                };
                match Decimal::try_from(f) {
                    Ok(d) => Ok(Some(d)),
                    Err(_) if f.abs() < 1.0 => Ok(Some(Decimal::ZERO)),
                    Err(_) => Err(self.out_of_range(f < 0.0, Value::Number(n.clone()))),
                }
            }
            Some(other) => Err(not_a_number(other.clone(), &other.to_string())),
        }
    }

    /// Rejects values outside `[min, max]`.
    pub fn check_range(&self, value: Decimal) -> Result<Decimal, BadValue> {
        if value < self.min {
            return Err(self.out_of_range(true, value.to_string().into()));
        }
        if value > self.max {
            return Err(self.out_of_range(false, value.to_string().into()));
        }
        Ok(value)
    }

    /// `TooSmall` below the range, `TooLarge` above it.
    fn out_of_range(&self, below: bool, raw: Value) -> BadValue {
        if below {
            BadValue::new(
                BadValueKind::TooSmall,
                raw,
                format!("Number cannot be smaller than {}", self.min),
            )
            .with_detail(json!({ "min": self.min.to_string() }))
        } else {
            BadValue::new(
                BadValueKind::TooLarge,
                raw,
                format!("Number cannot be larger than {}", self.max),
            )
            .with_detail(json!({ "max": self.max.to_string() }))
        }
    }

    /// `round(value × 10^precision)`, half away from zero.
    pub fn to_internal(&self, value: Decimal) -> Result<i64, BadValue> {
        let rounded =
            value.round_dp_with_strategy(self.precision, RoundingStrategy::MidpointAwayFromZero);
        // round_dp never increases the scale, so the shift is non-negative.
        let shift = self.precision - rounded.scale();
        10i128
            .checked_pow(shift)
            .and_then(|factor| rounded.mantissa().checked_mul(factor))
            .and_then(|scaled| i64::try_from(scaled).ok())
            .ok_or_else(|| {
                BadValue::new(
                    BadValueKind::Unrepresentable,
                    value.to_string(),
                    format!(
                        "{value} cannot be stored with {} decimal places",
                        self.precision
                    ),
                )
            })
    }

    /// `internal / 10^precision`, exact.
    #[must_use]
    pub fn to_external(&self, internal: i64) -> Decimal {
        Decimal::new(internal, self.precision)
    }

    /// Converts a query argument (string or number) to the stored integer
    /// form, so equality and range filters compare like with like.
    pub fn filter_value(&self, raw: &Value) -> Result<Value, BadValue> {
        self.coerce_stored(Some(raw))
    }
}

impl TryFrom<DecimalSpec> for ScaledDecimal {
    type Error = BadValue;

    fn try_from(spec: DecimalSpec) -> Result<Self, BadValue> {
        if spec.precision > MAX_PRECISION {
            return Err(BadValue::new(
                BadValueKind::Unrepresentable,
                spec.precision,
                format!(
                    "precision {} exceeds the maximum of {MAX_PRECISION}",
                    spec.precision
                ),
            ));
        }
        if spec.min > spec.max {
            return Err(BadValue::invalid(
                json!({ "min": spec.min.to_string(), "max": spec.max.to_string() }),
                format!("min {} is greater than max {}", spec.min, spec.max),
            ));
        }
        Ok(Self {
            precision: spec.precision,
            min: spec.min,
            max: spec.max,
        })
    }
}

impl From<ScaledDecimal> for DecimalSpec {
    fn from(d: ScaledDecimal) -> Self {
        Self {
            precision: d.precision,
            min: d.min,
            max: d.max,
        }
    }
}

impl Coercer for ScaledDecimal {
    type Output = Decimal;

    /// Parses, range-checks, then rounds to `precision` digits.
    fn coerce(&self, raw: Option<&Value>) -> Result<Option<Decimal>, BadValue> {
        let Some(value) = self.parse(raw)? else {
            return Ok(None);
        };
        let original = raw.cloned().unwrap_or(Value::Null);
        let with_raw = |e: BadValue| BadValue {
            raw: original.clone(),
            ..e
        };
        let value = self.check_range(value).map_err(with_raw)?;
        let internal = self.to_internal(value).map_err(with_raw)?;
        Ok(Some(self.to_external(internal)))
    }

    fn to_stored(&self, value: &Decimal) -> Result<Value, BadValue> {
        self.to_internal(*value).map(Value::from)
    }

    fn from_stored(&self, stored: &Value) -> Result<Decimal, BadValue> {
        stored
            .as_i64()
            .map(|internal| self.to_external(internal))
            .ok_or_else(|| BadValue::wrong_type(stored, "a stored integer"))
    }
}

fn not_a_number(raw: Value, text: &str) -> BadValue {
    BadValue::new(
        BadValueKind::NotANumber,
        raw,
        format!("{text} is not a numeric value"),
    )
}
