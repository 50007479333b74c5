//! Catalog lookups used to find the image table.

use std::sync::Arc;

use async_trait::async_trait;

use crate::gallery::QueryResult;
use crate::pool::PgPoolManager;
use crate::sql::{col, exists, BoundQuery, ExprExt, OrderByExpr, Postgres, Query, TableRef};

/// Questions the resolver asks the database catalog.
#[async_trait]
pub trait CatalogProbe: Send + Sync {
    /// Does `schema.table` exist?
    async fn table_exists(&self, schema: &str, table: &str) -> QueryResult<bool>;

    /// First schema, by name, that contains `table`.
    async fn find_table_schema(&self, table: &str) -> QueryResult<Option<String>>;
}

fn catalog_tables() -> TableRef {
    TableRef::new("tables").with_schema("information_schema")
}

/// `SELECT EXISTS (SELECT * FROM information_schema.tables WHERE ...)`
pub fn table_exists_query(schema: &str, table: &str) -> BoundQuery {
    let inner = Query::new()
        .select_star()
        .from(catalog_tables())
        .filter(col("table_schema").eq(schema))
        .filter(col("table_name").eq(table));

    Query::new()
        .select(vec![exists(inner)])
        .build(&Postgres)
}

/// Schemas holding `table`, lowest name first, at most one row.
pub fn find_table_schema_query(table: &str) -> BoundQuery {
    Query::new()
        .select(vec![col("table_schema")])
        .from(catalog_tables())
        .filter(col("table_name").eq(table))
        .order_by(vec![OrderByExpr::new(col("table_schema"))])
        .limit(1)
        .build(&Postgres)
}

/// Catalog probe backed by the managed connection pool.
#[derive(Debug, Clone)]
pub struct PgCatalogProbe {
    pools: Arc<PgPoolManager>,
}

impl PgCatalogProbe {
    pub fn new(pools: Arc<PgPoolManager>) -> Self {
        Self { pools }
    }
}

#[async_trait]
impl CatalogProbe for PgCatalogProbe {
    async fn table_exists(&self, schema: &str, table: &str) -> QueryResult<bool> {
        let query = table_exists_query(schema, table);
        let mut conn = self.pools.acquire().await?;
        let found: bool = sqlx::query_scalar_with(&query.sql, query.pg_arguments()?)
            .fetch_one(&mut *conn)
            .await?;
        Ok(found)
    }

    async fn find_table_schema(&self, table: &str) -> QueryResult<Option<String>> {
        let query = find_table_schema_query(table);
        let mut conn = self.pools.acquire().await?;
        let schema: Option<String> = sqlx::query_scalar_with(&query.sql, query.pg_arguments()?)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(schema)
    }
}
