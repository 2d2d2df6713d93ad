// Numeric field values
// A stored number is either a finite value or the empty "not yet entered" sentinel

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Largest integer that survives a round trip through a JSON (f64) number
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A profile number that may not have been entered yet.
///
/// Serializes as a JSON number or as `""`. Deserialization is lenient: numeric
/// strings are parsed, `null` and unparseable strings become [`Numeric::Empty`],
/// and non-finite values are never produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Numeric {
    Number(f64),
    #[default]
    Empty,
}

impl Numeric {
    /// Wrap a float, mapping NaN and infinities to `Empty`
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Numeric::Number(value)
        } else {
            Numeric::Empty
        }
    }

    /// Parse user or stored text with float semantics
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) => Numeric::from_f64(value),
            Err(_) => Numeric::Empty,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(value) => Some(*value),
            Numeric::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Numeric::Empty)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Number(value) => write!(f, "{}", value),
            Numeric::Empty => Ok(()),
        }
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Numeric::Number(value) => serialize_json_number(*value, serializer),
            Numeric::Empty => serializer.serialize_str(""),
        }
    }
}

struct NumericVisitor;

impl<'de> Visitor<'de> for NumericVisitor {
    type Value = Numeric;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string or an empty string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Numeric, E> {
        Ok(Numeric::from_f64(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Numeric, E> {
        Ok(Numeric::Number(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Numeric, E> {
        Ok(Numeric::Number(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Numeric, E> {
        Ok(Numeric::parse(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Numeric, E> {
        Ok(Numeric::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<Numeric, E> {
        Ok(Numeric::Empty)
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericVisitor)
    }
}

/// Write integral values without a fractional part (`68`, not `68.0`)
fn serialize_json_number<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

/// Serde adapter for required `f64` fields (goals, intake, minutes)
pub mod number {
    use super::*;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_json_number(*value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Numeric::deserialize(deserializer)? {
            Numeric::Number(value) => Ok(value),
            Numeric::Empty => Err(de::Error::custom("expected a finite number")),
        }
    }
}

/// Serde adapter for non-negative whole counters (sessions, streaks)
pub mod count {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Numeric::deserialize(deserializer)? {
            Numeric::Number(value)
                if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 =>
            {
                Ok(value as u32)
            }
            _ => Err(de::Error::custom("expected a non-negative whole number")),
        }
    }
}
