//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features used here:
//! - ANSI identifier quoting (`"`), so mixed-case columns like
//!   `labelDetail` survive case folding
//! - Numbered placeholders (`$n`)
//! - `ILIKE`

use super::helpers;
use super::SqlDialect;

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn placeholder(&self, n: usize) -> String {
        helpers::placeholder_dollar(n)
    }
}
