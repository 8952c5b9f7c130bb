//! The decoded column value domain.

use std::fmt;

/// A single decoded column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// `VK_BOOLEAN`.
    Bool(bool),
    /// `VK_BYTE`, `VK_WORD`, `VK_LONG`.
    Int(i32),
    /// `VK_LONG8`, `VK_DURATION`.
    Long(i64),
    /// `VK_REAL`, `VK_FLOAT`.
    Double(f64),
    /// `VK_STRING`.
    String(String),
    /// `VK_BLOB`, `VK_IMAGE`.
    Blob(Vec<u8>),
    /// `VK_TIMESTAMP`, `VK_TIME`, already formatted as `DD.MM.YYYY[ HH:MM:SS]`.
    DateTime(String),
}

impl Value {
    /// Whether this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::DateTime(s) => Some(s),
            _ => None,
        }
    }

    /// Try to widen the value to an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n as i64),
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to widen the value to an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            Value::Long(n) => Some(*n as f64),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Double(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Blob(b) => write!(f, "<{} bytes>", b.len()),
            Value::DateTime(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_has_no_textual_form() {
        let v = Value::Null;
        assert!(v.is_null());
        assert_eq!(v.as_str(), None);
        assert_eq!(format!("{v}"), "NULL");
    }

    #[test]
    fn int_widens_to_i64_and_f64() {
        let v = Value::Int(42);
        assert_eq!(v.as_i64(), Some(42));
        assert_eq!(v.as_f64(), Some(42.0));
    }

    #[test]
    fn string_round_trips_through_display() {
        let v = Value::String("hello".to_string());
        assert_eq!(v.as_str(), Some("hello"));
        assert_eq!(format!("{v}"), "hello");
    }
}
