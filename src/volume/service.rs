//! Resolve, download, and decode images.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use image::DynamicImage;

use super::error::{VolumeError, VolumeResult};
use super::files::FilesApi;
use super::path::normalize_volume_path;
use crate::config::VolumeSettings;

/// Downloads running at once in [`ImageService::load_many`].
const MAX_CONCURRENT_DOWNLOADS: usize = 4;

/// Loads images referenced by stored paths.
///
/// Nothing is cached: every call downloads the file again.
#[derive(Clone)]
pub struct ImageService {
    files: Arc<dyn FilesApi>,
    base_path: String,
    thumbnail_size: (u32, u32),
}

impl ImageService {
    pub fn new(files: Arc<dyn FilesApi>, settings: &VolumeSettings) -> Self {
        let [width, height] = settings.thumbnail_size;
        Self {
            files,
            base_path: settings.base_path.clone(),
            thumbnail_size: (width, height),
        }
    }

    /// Normalize `raw` against the configured base directory.
    pub fn resolve(&self, raw: &str) -> VolumeResult<String> {
        normalize_volume_path(raw, &self.base_path)
    }

    /// Download and decode the image at `raw`.
    pub async fn load_image(&self, raw: &str) -> VolumeResult<DynamicImage> {
        let path = self.resolve(raw)?;
        let bytes = self.files.download(&path).await?;
        tracing::debug!(path = %path, bytes = bytes.len(), "downloaded image");

        image::load_from_memory(&bytes).map_err(|source| VolumeError::Decode { path, source })
    }

    /// Like [`load_image`](Self::load_image), scaled down to fit the
    /// thumbnail bounds with the aspect ratio kept.
    pub async fn load_thumbnail(&self, raw: &str) -> VolumeResult<DynamicImage> {
        let (width, height) = self.thumbnail_size;
        let image = self.load_image(raw).await?;
        Ok(image.thumbnail(width, height))
    }

    /// Load several images; one result per input, in input order.
    ///
    /// A failure for one path does not affect the others.
    pub async fn load_many(&self, paths: &[String]) -> Vec<VolumeResult<DynamicImage>> {
        stream::iter(paths)
            .map(|path| self.load_image(path))
            .buffered(MAX_CONCURRENT_DOWNLOADS)
            .collect()
            .await
    }
}

impl std::fmt::Debug for ImageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageService")
            .field("base_path", &self.base_path)
            .field("thumbnail_size", &self.thumbnail_size)
            .finish_non_exhaustive()
    }
}
