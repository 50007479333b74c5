//! Image fetching from volume storage.
//!
//! Stored paths come in several spellings. They are normalized to
//! `/Volumes/<catalog>/<schema>/<volume>/<file>`, downloaded in full
//! through the Files API, and decoded with the `image` crate.

mod error;
mod files;
mod path;
mod service;

pub use error::{VolumeError, VolumeResult};
pub use files::{FilesApi, HttpFilesApi};
pub use path::{
    has_image_extension, is_volume_path, normalize_volume_path, DBFS_PREFIX, IMAGE_EXTENSIONS,
    VOLUMES_MARKER,
};
pub use service::ImageService;
