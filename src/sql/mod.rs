//! SQL generation module.
//!
//! A small type-safe builder for the read-only statements the gallery
//! issues. Identifiers are always quoted by the dialect and values are
//! always bound as placeholders.
//!
//! - [`query`] - SELECT query builder
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations
//! - [`types`] - Data types for casts
//! - [`value`] - Bound parameter values
//! - [`bind`] - Turning bound values into driver arguments

pub mod bind;
pub mod dialect;
pub mod expr;
pub mod query;
pub mod token;
pub mod types;
pub mod value;

#[cfg(test)]
pub mod test_utils;

pub use dialect::{Postgres, SqlDialect};
pub use expr::{col, count_star, exists, func, max, min, param, star, BinaryOperator, Expr, ExprExt};
pub use query::{BoundQuery, LimitOffset, OrderByExpr, Query, SelectExpr, TableRef};
pub use token::{Token, TokenStream};
pub use types::DataType;
pub use value::SqlValue;
