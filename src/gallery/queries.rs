//! Statement builders for the image table.
//!
//! Pure functions from a [`TableLayout`] and filter to a [`BoundQuery`];
//! execution lives in the repository.

use super::filter::ImageFilter;
use super::layout::TableLayout;
use crate::sql::{
    count_star, max, min, BoundQuery, DataType, ExprExt, OrderByExpr, Postgres, Query,
};

fn filtered_paths(layout: &TableLayout, filter: &ImageFilter) -> Query {
    Query::new()
        .select(vec![layout.path()])
        .from(layout.table_ref())
        .filter_opt(filter.to_condition(layout))
        .order_by(vec![OrderByExpr::new(layout.path())])
}

/// One page of matching paths, ordered by path.
pub fn list_paths_query(
    layout: &TableLayout,
    filter: &ImageFilter,
    limit: u64,
    offset: u64,
) -> BoundQuery {
    filtered_paths(layout, filter)
        .limit(limit)
        .offset(offset)
        .build(&Postgres)
}

/// Every matching path, ordered by path.
pub fn list_all_paths_query(layout: &TableLayout, filter: &ImageFilter) -> BoundQuery {
    filtered_paths(layout, filter).build(&Postgres)
}

/// Distinct non-null labels.
pub fn distinct_labels_query(layout: &TableLayout) -> BoundQuery {
    Query::new()
        .select(vec![layout.label()])
        .distinct()
        .from(layout.table_ref())
        .filter(layout.label().is_not_null())
        .order_by(vec![OrderByExpr::new(layout.label())])
        .build(&Postgres)
}

/// Distinct non-null label details, optionally only those seen with `label`.
pub fn distinct_label_details_query(layout: &TableLayout, label: Option<&str>) -> BoundQuery {
    let label_filter = label
        .filter(|l| !l.is_empty())
        .map(|l| layout.label().eq(l));

    Query::new()
        .select(vec![layout.label_detail()])
        .distinct()
        .from(layout.table_ref())
        .filter(layout.label_detail().is_not_null())
        .filter_opt(label_filter)
        .order_by(vec![OrderByExpr::new(layout.label_detail())])
        .build(&Postgres)
}

/// Lowest and highest non-null score, as `float8`.
pub fn score_range_query(layout: &TableLayout) -> BoundQuery {
    Query::new()
        .select(vec![
            min(layout.score()).cast(DataType::Float64).alias("min_score"),
            max(layout.score()).cast(DataType::Float64).alias("max_score"),
        ])
        .from(layout.table_ref())
        .filter(layout.score().is_not_null())
        .build(&Postgres)
}

/// Number of matching rows.
pub fn count_query(layout: &TableLayout, filter: &ImageFilter) -> BoundQuery {
    Query::new()
        .select(vec![count_star()])
        .from(layout.table_ref())
        .filter_opt(filter.to_condition(layout))
        .build(&Postgres)
}
