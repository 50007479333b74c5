//! Image listing queries.
//!
//! ```text
//! ImageFilter ──▶ queries::*_query(layout) ──▶ BoundQuery ──▶ ImageRepository
//!                        ▲                                        │
//!                 SchemaLocation (current schema)          PgPoolManager
//! ```
//!
//! Query construction is pure and tested without a database; the
//! repository only binds parameters and maps rows.

mod error;
mod filter;
mod layout;
mod page;
pub mod queries;
mod repository;

pub use error::{QueryError, QueryResult};
pub use filter::{contains_pattern, ImageFilter};
pub use layout::TableLayout;
pub use page::{display_path, file_name, Pagination};
pub use queries::{
    count_query, distinct_label_details_query, distinct_labels_query, list_all_paths_query,
    list_paths_query, score_range_query,
};
pub use repository::{ImageRepository, DEFAULT_SCORE_RANGE};
