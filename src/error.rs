//! Crate-level error taxonomy.
//!
//! Module errors carry the detail; [`GalleryError`] sorts them into the
//! categories a caller acts on: fix the setup, retry later, or report the
//! one bad item and carry on.

use thiserror::Error;

use crate::config::{ConnectionError, SettingsError};
use crate::credential::CredentialError;
use crate::gallery::QueryError;
use crate::pool::PoolError;
use crate::volume::VolumeError;

/// Result type for top-level gallery operations.
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Every failure a gallery operation can report.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// Missing or malformed configuration. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The identity service could not issue a token.
    #[error("credential error: {0}")]
    Credential(#[source] CredentialError),

    /// The database could not be reached or had no free connection.
    #[error("connectivity error: {0}")]
    Connectivity(String),

    /// The image table is nowhere in the database.
    #[error(
        "setup incomplete: table {schema}.{table} was not found in any schema. \
         Sync the image metadata table as {schema}.{table} and upload images to {volume}"
    )]
    SetupIncomplete {
        schema: String,
        table: String,
        volume: String,
    },

    /// An image path that cannot be mapped to a volume path.
    #[error("invalid image path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Downloaded bytes are not a readable image.
    #[error("decode error for {path}: {message}")]
    Decode { path: String, message: String },

    /// The object store request failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The statement itself failed.
    #[error("query error: {0}")]
    Query(String),
}

impl GalleryError {
    /// Whether trying the same action again later can succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            GalleryError::Credential(_)
                | GalleryError::Connectivity(_)
                | GalleryError::Transport(_)
                | GalleryError::Query(_)
        )
    }

    /// Short category name for display.
    pub fn kind(&self) -> &'static str {
        match self {
            GalleryError::Configuration(_) => "configuration",
            GalleryError::Credential(_) => "credential",
            GalleryError::Connectivity(_) => "connectivity",
            GalleryError::SetupIncomplete { .. } => "setup",
            GalleryError::InvalidPath { .. } => "invalid-path",
            GalleryError::NotFound(_) => "not-found",
            GalleryError::PermissionDenied(_) => "permission-denied",
            GalleryError::Decode { .. } => "decode",
            GalleryError::Transport(_) => "transport",
            GalleryError::Query(_) => "query",
        }
    }
}

impl From<ConnectionError> for GalleryError {
    fn from(err: ConnectionError) -> Self {
        GalleryError::Configuration(err.to_string())
    }
}

impl From<SettingsError> for GalleryError {
    fn from(err: SettingsError) -> Self {
        GalleryError::Configuration(err.to_string())
    }
}

impl From<CredentialError> for GalleryError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::NotConfigured => GalleryError::Configuration(err.to_string()),
            other => GalleryError::Credential(other),
        }
    }
}

impl From<PoolError> for GalleryError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Credential(inner) => inner.into(),
            other => GalleryError::Connectivity(other.to_string()),
        }
    }
}

impl From<QueryError> for GalleryError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Pool(pool) => pool.into(),
            other if other.is_connectivity() => GalleryError::Connectivity(other.to_string()),
            other => GalleryError::Query(other.to_string()),
        }
    }
}

impl From<VolumeError> for GalleryError {
    fn from(err: VolumeError) -> Self {
        match err {
            VolumeError::InvalidPath { path, reason } => GalleryError::InvalidPath { path, reason },
            VolumeError::NotFound { path } => GalleryError::NotFound(path),
            e @ VolumeError::PermissionDenied { .. } => GalleryError::PermissionDenied(e.to_string()),
            e @ (VolumeError::Status { .. } | VolumeError::Request { .. }) => {
                GalleryError::Transport(e.to_string())
            }
            VolumeError::Credential(inner) => inner.into(),
            VolumeError::Decode { path, source } => GalleryError::Decode {
                path,
                message: source.to_string(),
            },
        }
    }
}
