//! Credential-aware pool lifecycle.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::error::PoolResult;
use crate::credential::CredentialProvider;

/// Builds and tears down pools for a given bearer token.
#[async_trait]
pub trait PoolFactory: Send + Sync {
    /// Handle to a live pool. Cloning must be cheap and share the pool.
    type Pool: Clone + Send + Sync + 'static;

    /// Build a pool whose connections authenticate with `token`.
    async fn build(&self, token: &str) -> PoolResult<Self::Pool>;

    /// Stop handing out connections from a superseded pool.
    ///
    /// Must not wait for borrowed connections to come back: a caller holding
    /// one may itself be waiting on the manager.
    fn retire(&self, pool: Self::Pool);

    /// Close a pool and wait for its connections to be released.
    async fn close(&self, pool: Self::Pool);
}

/// Lifecycle of the managed pool.
pub enum PoolState<P> {
    /// No pool exists yet, or the last build failed.
    Unconnected,
    /// The old pool has been retired and the new one is being built.
    Rotating,
    /// A pool built from the credential with this generation.
    Connected { pool: P, generation: u64 },
}

impl<P> PoolState<P> {
    pub fn name(&self) -> &'static str {
        match self {
            PoolState::Unconnected => "unconnected",
            PoolState::Rotating => "rotating",
            PoolState::Connected { .. } => "connected",
        }
    }
}

impl<P> fmt::Debug for PoolState<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolState::Connected { generation, .. } => f
                .debug_struct("Connected")
                .field("generation", generation)
                .finish_non_exhaustive(),
            other => f.write_str(other.name()),
        }
    }
}

/// Owns the process-wide pool and keeps it in step with the credential.
///
/// Every call to [`pool`](Self::pool) holds the state lock while it checks
/// the credential, so a token refresh and the rebuild it causes happen
/// once, and concurrent callers wait for the rebuilt pool instead of seeing
/// the old one half-closed.
pub struct PoolManager<F: PoolFactory> {
    factory: F,
    credentials: Arc<CredentialProvider>,
    state: Mutex<PoolState<F::Pool>>,
    rebuilds: AtomicU64,
}

impl<F: PoolFactory> PoolManager<F> {
    pub fn new(factory: F, credentials: Arc<CredentialProvider>) -> Self {
        Self {
            factory,
            credentials,
            state: Mutex::new(PoolState::Unconnected),
            rebuilds: AtomicU64::new(0),
        }
    }

    /// The pool factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// The credential provider pools are built from.
    pub fn credentials(&self) -> &Arc<CredentialProvider> {
        &self.credentials
    }

    /// Return a pool built from the current credential.
    ///
    /// Refreshes the credential when stale and rebuilds the pool when the
    /// credential generation moved on since it was built.
    pub async fn pool(&self) -> PoolResult<F::Pool> {
        let mut state = self.state.lock().await;
        let credential = self.credentials.get_token().await?;

        if let PoolState::Connected { pool, generation } = &*state {
            if *generation == credential.generation() {
                return Ok(pool.clone());
            }
        }

        if let PoolState::Connected { pool, generation } =
            std::mem::replace(&mut *state, PoolState::Rotating)
        {
            tracing::info!(
                old_generation = generation,
                new_generation = credential.generation(),
                "credential rotated, retiring connection pool"
            );
            self.factory.retire(pool);
        }

        match self.factory.build(credential.token()).await {
            Ok(pool) => {
                let rebuilds = self.rebuilds.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::info!(
                    generation = credential.generation(),
                    rebuilds,
                    "connection pool ready"
                );
                *state = PoolState::Connected {
                    pool: pool.clone(),
                    generation: credential.generation(),
                };
                Ok(pool)
            }
            Err(err) => {
                tracing::warn!(error = %err, "connection pool build failed");
                *state = PoolState::Unconnected;
                Err(err)
            }
        }
    }

    /// Number of pools built so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds.load(Ordering::SeqCst)
    }

    /// Name of the current state.
    pub async fn state_name(&self) -> &'static str {
        self.state.lock().await.name()
    }

    /// Close the current pool, waiting for borrowed connections.
    pub async fn close(&self) {
        let previous = std::mem::replace(&mut *self.state.lock().await, PoolState::Unconnected);
        if let PoolState::Connected { pool, .. } = previous {
            self.factory.close(pool).await;
        }
    }
}

impl<F: PoolFactory> fmt::Debug for PoolManager<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolManager")
            .field("rebuilds", &self.rebuild_count())
            .finish_non_exhaustive()
    }
}
