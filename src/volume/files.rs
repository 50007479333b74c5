//! Workspace Files API client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;

use super::error::{VolumeError, VolumeResult};
use crate::config::ConnectionError;
use crate::credential::CredentialProvider;

/// Downloads whole files from volume storage.
#[async_trait]
pub trait FilesApi: Send + Sync {
    /// Read the full contents of the file at a normalized `/Volumes/...` path.
    ///
    /// An existing empty file yields empty bytes, not an error.
    async fn download(&self, path: &str) -> VolumeResult<Bytes>;
}

/// Files API over HTTPS, authenticated with the shared bearer token.
pub struct HttpFilesApi {
    client: reqwest::Client,
    base: Url,
    credentials: Arc<CredentialProvider>,
}

impl HttpFilesApi {
    /// `workspace_host` is the normalized host URL; `api_path` the Files API
    /// route, e.g. `/api/2.0/fs/files`.
    pub fn new(
        workspace_host: &str,
        api_path: &str,
        timeout: Duration,
        credentials: Arc<CredentialProvider>,
    ) -> Result<Self, ConnectionError> {
        let base = format!(
            "{}/{}",
            workspace_host.trim_end_matches('/'),
            api_path.trim_matches('/')
        );
        let base = Url::parse(&base).map_err(|err| {
            ConnectionError::InvalidConfig(format!("invalid Files API URL {base:?}: {err}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(ConnectionError::InvalidConfig(format!(
                "invalid Files API URL {base}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConnectionError::InvalidConfig(format!("HTTP client: {err}")))?;

        Ok(Self {
            client,
            base,
            credentials,
        })
    }

    /// URL for a volume path, one encoded segment per path component.
    pub fn file_url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }
}

#[async_trait]
impl FilesApi for HttpFilesApi {
    async fn download(&self, path: &str) -> VolumeResult<Bytes> {
        let token = self.credentials.token().await?;
        let url = self.file_url(path);
        tracing::debug!(path, "downloading file");

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| VolumeError::Request {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), "download failed");
            return Err(VolumeError::from_status(path, status.as_u16(), body));
        }

        response.bytes().await.map_err(|source| VolumeError::Request {
            path: path.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for HttpFilesApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFilesApi")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}
