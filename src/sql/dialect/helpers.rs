//! Shared helper functions for SQL dialect implementations.

/// Quote identifier with double quotes (ANSI style).
/// Used by: Postgres
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Numbered placeholder (`$1`, `$2`, ...).
/// Used by: Postgres
pub fn placeholder_dollar(n: usize) -> String {
    format!("${}", n)
}
