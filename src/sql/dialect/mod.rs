//! SQL Dialect definitions and formatting rules.
//!
//! The gallery only talks to Postgres-compatible endpoints, but rendering
//! still goes through the `SqlDialect` trait so quoting and placeholder
//! rules live in one place:
//!
//! - Identifier quoting: `"ident"`, embedded quotes doubled
//! - Placeholders: `$1`, `$2`, ... in order of appearance
//! - Case-insensitive match: `ILIKE`
//!
//! # Usage
//!
//! ```ignore
//! use gallery::sql::dialect::{Postgres, SqlDialect};
//!
//! let quoted = Postgres.quote_identifier("labelDetail"); // "labelDetail"
//! ```

pub mod helpers;
mod postgres;

pub use postgres::Postgres;

use super::types::DataType;

/// SQL dialect trait - defines how SQL constructs are rendered.
pub trait SqlDialect: std::fmt::Debug + Send + Sync {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    /// Quote an identifier (schema, table, column, alias).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Render the placeholder for the `n`th bound parameter (1-based).
    fn placeholder(&self, n: usize) -> String;

    /// Keyword for a case-insensitive pattern match.
    fn case_insensitive_like(&self) -> &'static str {
        "ILIKE"
    }

    /// Emit a data type for this dialect.
    fn emit_data_type(&self, dt: DataType) -> String {
        match dt {
            DataType::Float64 => "DOUBLE PRECISION".into(),
        }
    }
}
