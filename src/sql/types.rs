//! SQL-level data types used in casts.

use std::fmt;

/// A column type a value can be cast to.
///
/// Only the types the gallery reads back are listed; the dialect decides
/// how each is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit floating point (DOUBLE PRECISION/FLOAT8).
    Float64,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Float64 => write!(f, "float64"),
        }
    }
}
