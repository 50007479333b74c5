//! Pool-specific error types.

use std::time::Duration;

use thiserror::Error;

use crate::credential::CredentialError;

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;

/// Errors that can occur while building a pool or acquiring a connection.
#[derive(Error, Debug)]
pub enum PoolError {
    /// No token could be obtained for the new pool.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The database refused or could not be reached.
    #[error("database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    /// Every connection stayed busy for the whole acquire timeout.
    #[error("no database connection became available within {}s", .timeout.as_secs())]
    Exhausted { timeout: Duration },
}

impl PoolError {
    /// Map an sqlx error raised while acquiring from a pool.
    pub(crate) fn from_acquire(err: sqlx::Error, timeout: Duration) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => Self::Exhausted { timeout },
            other => Self::Connect(other),
        }
    }
}
