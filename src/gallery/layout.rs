//! Physical layout of the image table.

use crate::config::TableSettings;
use crate::sql::{col, Expr, TableRef};

/// Schema, table, and column names for the image table.
///
/// Built fresh for each query from the currently resolved schema, so a
/// relocation is picked up by the next statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub schema: String,
    pub table: String,
    pub path_column: String,
    pub label_column: String,
    pub label_detail_column: String,
    pub score_column: String,
}

impl TableLayout {
    /// Layout from settings, with the schema overridden.
    pub fn from_settings(settings: &TableSettings, schema: &str) -> Self {
        Self {
            schema: schema.to_string(),
            table: settings.name.clone(),
            path_column: settings.path_column.clone(),
            label_column: settings.label_column.clone(),
            label_detail_column: settings.label_detail_column.clone(),
            score_column: settings.score_column.clone(),
        }
    }

    pub fn table_ref(&self) -> TableRef {
        TableRef::new(&self.table).with_schema(&self.schema)
    }

    pub fn path(&self) -> Expr {
        col(&self.path_column)
    }

    pub fn label(&self) -> Expr {
        col(&self.label_column)
    }

    pub fn label_detail(&self) -> Expr {
        col(&self.label_detail_column)
    }

    pub fn score(&self) -> Expr {
        col(&self.score_column)
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        let settings = TableSettings::default();
        Self::from_settings(&settings, &settings.schema)
    }
}
