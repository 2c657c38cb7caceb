//! Value enum for dynamic cell values

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A dynamic scalar stored in a [`Row`](super::Row) cell.
///
/// Rows come from a remote JSON source, so values are deserialized
/// untagged: the first variant that accepts the JSON token wins.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true / false | `Bool` |
/// | integer | `Int` |
/// | other number | `Float` |
/// | string | `String` |
/// | array / object | `Json` |
///
/// # Example
///
/// ```
/// use table_lib::model::Value;
///
/// let title = Value::from("Monitor");
/// let price = Value::from(199);
/// let rating = Value::from(4.5);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Fallback for non-scalar JSON values.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the numeric meaning of this value, if it has one.
    ///
    /// Numeric strings are parsed and booleans count as `0`/`1`, so a column
    /// declared numeric still orders correctly when the source sends
    /// `"12.5"` instead of `12.5`. `NaN` has no numeric meaning.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            Value::Int(v) => *v as f64,
            Value::Float(v) => *v,
            Value::Bool(v) => f64::from(u8::from(*v)),
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            Value::Null | Value::Json(_) => return None,
        };
        (!number.is_nan()).then_some(number)
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Default scalar-to-text rendering. `Null` renders as an empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(v) => f.write_str(v),
            Value::Json(v) => write!(f, "{}", v),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_deserialize() {
        let values: Vec<Value> =
            serde_json::from_str(r#"[null, true, 3, 3.5, "x", [1, 2]]"#).unwrap();
        assert_eq!(values[0], Value::Null);
        assert_eq!(values[1], Value::Bool(true));
        assert_eq!(values[2], Value::Int(3));
        assert_eq!(values[3], Value::Float(3.5));
        assert_eq!(values[4], Value::from("x"));
        assert!(matches!(values[5], Value::Json(_)));
    }

    #[test]
    fn test_as_number_coercion() {
        assert_eq!(Value::from(7).as_number(), Some(7.0));
        assert_eq!(Value::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(Value::from(true).as_number(), Some(1.0));
        assert_eq!(Value::from("abc").as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
        assert_eq!(Value::from(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(1.0).to_string(), "1");
        assert_eq!(Value::from(2.25).to_string(), "2.25");
        assert_eq!(Value::from("Monitor").to_string(), "Monitor");
    }
}
