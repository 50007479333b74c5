//! Credential-specific error types.

use thiserror::Error;

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Errors that can occur while obtaining a bearer token.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The identity service could not be reached.
    #[error("identity service request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The identity service answered with a non-success status.
    #[error("identity service rejected the token request ({status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response carried no usable token.
    #[error("identity service returned an empty access token")]
    EmptyToken,

    /// Neither OAuth client credentials nor a personal token are configured.
    #[error(
        "no workspace credentials configured: set DATABRICKS_CLIENT_ID and \
         DATABRICKS_CLIENT_SECRET, or DATABRICKS_TOKEN"
    )]
    NotConfigured,

    /// Any other token source failure.
    #[error("credential source failed: {0}")]
    Source(String),
}

impl CredentialError {
    /// Build a rejection error, keeping at most 512 bytes of the body.
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        let mut body = body.into();
        if body.len() > 512 {
            let mut cut = 512;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        Self::Rejected { status, body }
    }
}

impl From<reqwest::Error> for CredentialError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err)
    }
}
