//! # Gallery
//!
//! Browse AI-labeled image records stored in a managed Postgres table and
//! render the referenced images from volume storage.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Gallery (app)                          │
//! │   labels / details / range / count / page / load_image   │
//! └─────────────────────────────────────────────────────────┘
//!          │                                   │
//!          ▼ [gallery]                         ▼ [volume]
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │  ImageFilter → BoundQuery │   │  normalize → download →  │
//! │  ImageRepository          │   │  decode / thumbnail      │
//! └──────────────────────────┘   └──────────────────────────┘
//!          │            ▲                      │
//!          │            │ [schema]             │
//!          │     SchemaLocation                │
//!          ▼ [pool]                            │
//! ┌──────────────────────────┐                 │
//! │  PoolManager (rebuild on │                 │
//! │  credential generation)  │                 │
//! └──────────────────────────┘                 │
//!          │                                   │
//!          ▼ [credential]                      ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │        CredentialProvider (bearer token, 15 min)         │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod credential;
pub mod error;
pub mod gallery;
pub mod pool;
pub mod schema;
pub mod sql;
pub mod volume;


pub use app::{Gallery, Page};
pub use error::{GalleryError, GalleryResult};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::app::{Gallery, Page};
    pub use crate::config::{PgConnectionConfig, Settings};
    pub use crate::credential::{CredentialProvider, TokenSource};
    pub use crate::error::{GalleryError, GalleryResult};
    pub use crate::gallery::{ImageFilter, ImageRepository, Pagination, TableLayout};
    pub use crate::pool::{PgPoolManager, PoolManager};
    pub use crate::schema::{SchemaLocation, SchemaResolver};
    pub use crate::volume::{normalize_volume_path, ImageService};
}
