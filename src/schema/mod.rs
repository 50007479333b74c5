//! Schema resolution for the image table.
//!
//! The table is expected in the configured schema, but synced tables do
//! not always land there. [`SchemaResolver`] checks the configured schema
//! first and otherwise searches the catalog, recording what it finds in a
//! shared [`SchemaLocation`] that every query reads from.

mod location;
mod probe;
mod resolver;

pub use location::SchemaLocation;
pub use probe::{find_table_schema_query, table_exists_query, CatalogProbe, PgCatalogProbe};
pub use resolver::SchemaResolver;
