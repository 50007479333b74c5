//! Image fetch error types.

use thiserror::Error;

use crate::credential::CredentialError;

/// Result type for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors that can occur while resolving, downloading, or decoding an image.
#[derive(Error, Debug)]
pub enum VolumeError {
    /// The path cannot be turned into a volume path.
    #[error("invalid image path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The Files API has no file at this path.
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// The token is not allowed to read this path.
    #[error("permission denied ({status}) reading {path}")]
    PermissionDenied { path: String, status: u16 },

    /// The Files API answered with an unexpected status.
    #[error("download of {path} failed with status {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    /// The request did not complete.
    #[error("download of {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// No token for the download.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The bytes are not an image we can read.
    #[error("could not decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

impl VolumeError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Map a non-success HTTP status for `path`.
    pub(crate) fn from_status(path: &str, status: u16, body: String) -> Self {
        match status {
            404 => Self::NotFound {
                path: path.to_string(),
            },
            401 | 403 => Self::PermissionDenied {
                path: path.to_string(),
                status,
            },
            _ => {
                let mut body = body;
                if body.len() > 512 {
                    let mut cut = 512;
                    while !body.is_char_boundary(cut) {
                        cut -= 1;
                    }
                    body.truncate(cut);
                }
                Self::Status {
                    path: path.to_string(),
                    status,
                    body,
                }
            }
        }
    }
}
