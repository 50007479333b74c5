//! Runs gallery queries against the managed pool.

use std::sync::Arc;

use sqlx::Row;

use super::error::QueryResult;
use super::filter::ImageFilter;
use super::layout::TableLayout;
use super::queries;
use crate::config::TableSettings;
use crate::pool::PgPoolManager;
use crate::schema::SchemaLocation;
use crate::sql::BoundQuery;

/// Score range reported when no row has a score.
pub const DEFAULT_SCORE_RANGE: (f64, f64) = (0.0, 1.0);

/// Read-only access to the image table.
///
/// Each call reads the current schema from the shared [`SchemaLocation`],
/// borrows one connection, and gives it back before returning.
#[derive(Debug, Clone)]
pub struct ImageRepository {
    pools: Arc<PgPoolManager>,
    location: Arc<SchemaLocation>,
    table: TableSettings,
}

impl ImageRepository {
    pub fn new(
        pools: Arc<PgPoolManager>,
        location: Arc<SchemaLocation>,
        table: TableSettings,
    ) -> Self {
        Self {
            pools,
            location,
            table,
        }
    }

    /// Layout for the next statement.
    pub fn layout(&self) -> TableLayout {
        TableLayout::from_settings(&self.table, &self.location.current())
    }

    /// Matching paths for one page, ordered by path.
    pub async fn list_paths(
        &self,
        filter: &ImageFilter,
        limit: u64,
        offset: u64,
    ) -> QueryResult<Vec<String>> {
        let query = queries::list_paths_query(&self.layout(), filter, limit, offset);
        self.fetch_strings(query).await
    }

    /// Every matching path, ordered by path.
    pub async fn list_all_paths(&self, filter: &ImageFilter) -> QueryResult<Vec<String>> {
        let query = queries::list_all_paths_query(&self.layout(), filter);
        self.fetch_strings(query).await
    }

    pub async fn distinct_labels(&self) -> QueryResult<Vec<String>> {
        self.fetch_strings(queries::distinct_labels_query(&self.layout()))
            .await
    }

    pub async fn distinct_label_details(&self, label: Option<&str>) -> QueryResult<Vec<String>> {
        self.fetch_strings(queries::distinct_label_details_query(&self.layout(), label))
            .await
    }

    /// Inclusive score bounds, or [`DEFAULT_SCORE_RANGE`] when nothing is scored.
    pub async fn score_range(&self) -> QueryResult<(f64, f64)> {
        let query = queries::score_range_query(&self.layout());
        let mut conn = self.pools.acquire().await?;
        let row = sqlx::query_with(&query.sql, query.pg_arguments()?)
            .fetch_one(&mut *conn)
            .await?;

        let min: Option<f64> = row.try_get(0)?;
        let max: Option<f64> = row.try_get(1)?;
        Ok(match (min, max) {
            (Some(min), Some(max)) => (min, max),
            _ => DEFAULT_SCORE_RANGE,
        })
    }

    /// Number of matching rows.
    pub async fn count(&self, filter: &ImageFilter) -> QueryResult<u64> {
        let query = queries::count_query(&self.layout(), filter);
        let mut conn = self.pools.acquire().await?;
        let count: i64 = sqlx::query_scalar_with(&query.sql, query.pg_arguments()?)
            .fetch_one(&mut *conn)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn fetch_strings(&self, query: BoundQuery) -> QueryResult<Vec<String>> {
        tracing::debug!(sql = %query.sql, params = query.params.len(), "running query");
        let mut conn = self.pools.acquire().await?;
        let values: Vec<String> = sqlx::query_scalar_with(&query.sql, query.pg_arguments()?)
            .fetch_all(&mut *conn)
            .await?;
        Ok(values)
    }
}
