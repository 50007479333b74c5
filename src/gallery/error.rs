//! Query-specific error types.

use thiserror::Error;

use crate::pool::PoolError;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors that can occur while running a read query.
#[derive(Error, Debug)]
pub enum QueryError {
    /// No connection could be obtained.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// The statement failed or its rows could not be decoded.
    #[error("query failed: {0}")]
    Database(#[from] sqlx::Error),
}

impl QueryError {
    /// True when the failure is about reaching the database rather than
    /// about the statement itself.
    pub fn is_connectivity(&self) -> bool {
        match self {
            QueryError::Pool(PoolError::Credential(_)) => false,
            QueryError::Pool(_) => true,
            QueryError::Database(err) => matches!(
                err,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
        }
    }
}
