//! Wiring of the gallery components.
//!
//! [`Gallery`] owns one of each shared component and exposes the
//! operations a front end needs. Every method returns a [`GalleryError`]
//! classified for display, and the image table is located once before
//! the first query.

use std::sync::Arc;

use image::DynamicImage;
use tokio::sync::OnceCell;

use crate::config::{PgConnectionConfig, Settings};
use crate::credential::{token_source_from_env, CredentialProvider, TokenSource};
use crate::error::{GalleryError, GalleryResult};
use crate::gallery::{ImageFilter, ImageRepository, Pagination};
use crate::pool::{PgPoolFactory, PgPoolManager};
use crate::schema::{PgCatalogProbe, SchemaLocation, SchemaResolver};
use crate::volume::{HttpFilesApi, ImageService};

/// One page of paths plus the paging state it was fetched with.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub paths: Vec<String>,
    pub pagination: Pagination,
}

/// Shared state for browsing the image table.
#[derive(Debug)]
pub struct Gallery {
    settings: Settings,
    connection: PgConnectionConfig,
    credentials: Arc<CredentialProvider>,
    pools: Arc<PgPoolManager>,
    resolver: SchemaResolver,
    repository: ImageRepository,
    images: ImageService,
    located: OnceCell<String>,
}

impl Gallery {
    /// Build from the environment and the given settings.
    ///
    /// Fails with [`GalleryError::Configuration`] listing every missing
    /// variable before anything is contacted.
    pub fn from_env(settings: Settings) -> GalleryResult<Self> {
        let connection = PgConnectionConfig::from_env()?;
        let source = token_source_from_env(&connection.workspace_host)?;
        Self::new(settings, connection, source)
    }

    /// Build from explicit parts.
    pub fn new(
        settings: Settings,
        connection: PgConnectionConfig,
        source: Arc<dyn TokenSource>,
    ) -> GalleryResult<Self> {
        let credentials = Arc::new(CredentialProvider::new(
            source,
            settings.credential.refresh_interval(),
        ));
        let pools = Arc::new(PgPoolManager::new(
            PgPoolFactory::new(connection.clone(), settings.pool.clone()),
            credentials.clone(),
        ));
        let location = Arc::new(SchemaLocation::new(settings.table.schema.clone()));
        let resolver = SchemaResolver::new(
            location.clone(),
            Arc::new(PgCatalogProbe::new(pools.clone())),
        );
        let repository =
            ImageRepository::new(pools.clone(), location, settings.table.clone());
        let files = HttpFilesApi::new(
            &connection.workspace_host,
            &settings.volume.files_api_path,
            settings.volume.request_timeout(),
            credentials.clone(),
        )?;
        let images = ImageService::new(Arc::new(files), &settings.volume);

        tracing::debug!(target_db = %connection.describe(), "gallery configured");

        Ok(Self {
            settings,
            connection,
            credentials,
            pools,
            resolver,
            repository,
            images,
            located: OnceCell::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn connection(&self) -> &PgConnectionConfig {
        &self.connection
    }

    pub fn credentials(&self) -> &Arc<CredentialProvider> {
        &self.credentials
    }

    pub fn pools(&self) -> &Arc<PgPoolManager> {
        &self.pools
    }

    pub fn repository(&self) -> &ImageRepository {
        &self.repository
    }

    pub fn images(&self) -> &ImageService {
        &self.images
    }

    /// Locate the image table, returning the schema it lives in.
    ///
    /// Runs the catalog lookup at most once per successful call; a failed
    /// lookup is retried on the next call.
    pub async fn check_setup(&self) -> GalleryResult<String> {
        self.located
            .get_or_try_init(|| {
                self.resolver
                    .check_setup(&self.settings.table.name, &self.settings.volume.base_path)
            })
            .await
            .cloned()
    }

    pub async fn labels(&self) -> GalleryResult<Vec<String>> {
        self.check_setup().await?;
        Ok(self.repository.distinct_labels().await?)
    }

    pub async fn label_details(&self, label: Option<&str>) -> GalleryResult<Vec<String>> {
        self.check_setup().await?;
        Ok(self.repository.distinct_label_details(label).await?)
    }

    pub async fn score_range(&self) -> GalleryResult<(f64, f64)> {
        self.check_setup().await?;
        Ok(self.repository.score_range().await?)
    }

    pub async fn count(&self, filter: &ImageFilter) -> GalleryResult<u64> {
        self.check_setup().await?;
        Ok(self.repository.count(filter).await?)
    }

    /// Count matches, clamp the requested page, and fetch it.
    pub async fn page(
        &self,
        filter: &ImageFilter,
        page: u64,
        per_page: u64,
    ) -> GalleryResult<Page> {
        let total = self.count(filter).await?;
        let pagination = Pagination::new(page, per_page, total);
        let paths = self
            .repository
            .list_paths(filter, pagination.per_page(), pagination.offset())
            .await?;
        Ok(Page { paths, pagination })
    }

    pub async fn all_paths(&self, filter: &ImageFilter) -> GalleryResult<Vec<String>> {
        self.check_setup().await?;
        Ok(self.repository.list_all_paths(filter).await?)
    }

    pub async fn load_image(&self, path: &str) -> GalleryResult<DynamicImage> {
        Ok(self.images.load_image(path).await?)
    }

    pub async fn load_thumbnail(&self, path: &str) -> GalleryResult<DynamicImage> {
        Ok(self.images.load_thumbnail(path).await?)
    }

    /// One result per path; failures stay with their path.
    pub async fn load_many(&self, paths: &[String]) -> Vec<GalleryResult<DynamicImage>> {
        self.images
            .load_many(paths)
            .await
            .into_iter()
            .map(|result| result.map_err(GalleryError::from))
            .collect()
    }

    /// Close the pool, waiting for borrowed connections.
    pub async fn shutdown(&self) {
        self.pools.close().await;
    }
}
