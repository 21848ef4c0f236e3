//! Dynamically typed cell values

use crate::field::FieldKind;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A single cell of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent / missing
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Value {
    /// Parse a raw CSV cell according to the field's declared kind.
    ///
    /// Empty or whitespace-only cells parse to `Null`. Returns `None` when the
    /// cell is non-empty but not a valid value of `kind`. Integer fields also
    /// accept whole-number floats such as `36.0` that fit in an `i64`. Numeric
    /// fields reject `NaN` and infinities.
    pub fn parse(raw: &str, kind: FieldKind) -> Option<Value> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Some(Value::Null);
        }
        match kind {
            FieldKind::Text => Some(Value::Text(trimmed.to_string())),
            FieldKind::Integer => {
                if let Ok(n) = trimmed.parse::<i64>() {
                    return Some(Value::Integer(n));
                }
                // i64::MAX as f64 rounds up to 2^63, which is already out of range
                match trimmed.parse::<f64>() {
                    Ok(f)
                        if f.fract() == 0.0
                            && f >= i64::MIN as f64
                            && f < i64::MAX as f64 =>
                    {
                        Some(Value::Integer(f as i64))
                    }
                    _ => None,
                }
            }
            FieldKind::Float => trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of the value (integers widen to float).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Canonical form used for natural-key comparison.
    ///
    /// `Null` maps to `None`, so an absent value never collides with a present
    /// one (not even the empty string). Present values render through
    /// `Display`, the same way on both sides of every lookup.
    pub fn key_repr(&self) -> Option<String> {
        match self {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Natural ordering: numbers numerically, text lexicographically,
    /// numbers before text, `Null` last.
    pub fn natural_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Text(_), _) => Ordering::Greater,
            (_, Value::Text(_)) => Ordering::Less,
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (a, b) => {
                let (x, y) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                x.total_cmp(&y)
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
