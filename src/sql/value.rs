//! Values bound to query placeholders.

use std::fmt;

/// A value bound to a positional placeholder.
///
/// Only the shapes the gallery queries produce are represented; each maps
/// to a single Postgres parameter type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// `text`
    Text(String),
    /// `float8`
    Float(f64),
    /// `int8`
    Int(i64),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(s) => write!(f, "{:?}", s),
            SqlValue::Float(v) => write!(f, "{}", v),
            SqlValue::Int(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}
