//! Driver arguments for rendered queries.

use sqlx::postgres::PgArguments;
use sqlx::Arguments;

use super::query::BoundQuery;
use super::value::SqlValue;

impl BoundQuery {
    /// Build the Postgres argument list for this query's placeholders.
    pub fn pg_arguments(&self) -> Result<PgArguments, sqlx::Error> {
        let mut args = PgArguments::default();
        for value in &self.params {
            let added = match value {
                SqlValue::Text(s) => args.add(s.clone()),
                SqlValue::Float(f) => args.add(*f),
                SqlValue::Int(i) => args.add(*i),
            };
            added.map_err(sqlx::Error::Encode)?;
        }
        Ok(args)
    }
}
