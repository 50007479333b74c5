//! One-shot discovery of the image table's schema.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::location::SchemaLocation;
use super::probe::CatalogProbe;
use crate::error::GalleryError;
use crate::gallery::QueryResult;

/// Finds the image table, falling back to a catalog-wide search.
///
/// Once the table has been seen in a schema that answer is kept for the
/// life of the process; later calls only re-run the cheap existence check.
pub struct SchemaResolver {
    location: Arc<SchemaLocation>,
    probe: Arc<dyn CatalogProbe>,
    resolving: Mutex<()>,
}

impl SchemaResolver {
    pub fn new(location: Arc<SchemaLocation>, probe: Arc<dyn CatalogProbe>) -> Self {
        Self {
            location,
            probe,
            resolving: Mutex::new(()),
        }
    }

    /// Shared schema state this resolver updates.
    pub fn location(&self) -> &Arc<SchemaLocation> {
        &self.location
    }

    /// Make sure `table` is reachable through the current schema.
    ///
    /// Returns `Ok(false)` when no schema contains it; the location is left
    /// untouched in that case.
    pub async fn ensure_table_located(&self, table: &str) -> QueryResult<bool> {
        let _guard = self.resolving.lock().await;
        let schema = self.location.current();

        if self.probe.table_exists(&schema, table).await? {
            return Ok(true);
        }

        match self.probe.find_table_schema(table).await? {
            Some(found) => {
                if self.location.relocate(&found) {
                    tracing::info!(
                        table,
                        from = %schema,
                        to = %found,
                        "image table found in another schema"
                    );
                }
                Ok(true)
            }
            None => {
                tracing::warn!(table, schema = %schema, "image table not found in any schema");
                Ok(false)
            }
        }
    }

    /// Like [`ensure_table_located`](Self::ensure_table_located), but turns
    /// a missing table into a setup error with guidance.
    ///
    /// Returns the schema the table was found in.
    pub async fn check_setup(&self, table: &str, volume: &str) -> Result<String, GalleryError> {
        if self.ensure_table_located(table).await? {
            Ok(self.location.current())
        } else {
            Err(GalleryError::SetupIncomplete {
                schema: self.location.configured().to_string(),
                table: table.to_string(),
                volume: volume.to_string(),
            })
        }
    }
}

impl std::fmt::Debug for SchemaResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaResolver")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
