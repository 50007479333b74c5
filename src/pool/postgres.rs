//! sqlx-backed pools for the workspace database.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use sqlx::Postgres;

use super::error::{PoolError, PoolResult};
use super::manager::{PoolFactory, PoolManager};
use crate::config::{PgConnectionConfig, PoolSettings, SslMode};

/// Pool manager for the workspace Postgres endpoint.
pub type PgPoolManager = PoolManager<PgPoolFactory>;

/// Builds `PgPool`s with the bearer token as password.
#[derive(Debug, Clone)]
pub struct PgPoolFactory {
    config: PgConnectionConfig,
    settings: PoolSettings,
}

impl PgPoolFactory {
    pub fn new(config: PgConnectionConfig, settings: PoolSettings) -> Self {
        Self { config, settings }
    }

    pub fn config(&self) -> &PgConnectionConfig {
        &self.config
    }

    /// How long `acquire` waits for a free connection.
    pub fn acquire_timeout(&self) -> Duration {
        self.settings.acquire_timeout()
    }

    /// Connection options for the given token.
    pub fn connect_options(&self, token: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .database(&self.config.database)
            .username(&self.config.username)
            .password(token)
            .ssl_mode(to_sqlx_ssl_mode(self.config.ssl_mode))
            .application_name(&self.config.application_name)
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.settings.min_size)
            .max_connections(self.settings.max_size)
            .acquire_timeout(self.settings.acquire_timeout())
    }
}

fn to_sqlx_ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Allow => PgSslMode::Allow,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

#[async_trait]
impl PoolFactory for PgPoolFactory {
    type Pool = PgPool;

    async fn build(&self, token: &str) -> PoolResult<PgPool> {
        tracing::debug!(
            target_db = %self.config.describe(),
            min = self.settings.min_size,
            max = self.settings.max_size,
            "building connection pool"
        );
        self.pool_options()
            .connect_with(self.connect_options(token))
            .await
            .map_err(|err| PoolError::from_acquire(err, self.acquire_timeout()))
    }

    fn retire(&self, pool: PgPool) {
        // Closing waits for borrowed connections, so do it off the caller's path.
        tokio::spawn(async move { pool.close().await });
    }

    async fn close(&self, pool: PgPool) {
        pool.close().await;
    }
}

impl PoolManager<PgPoolFactory> {
    /// Borrow a connection from the current pool.
    ///
    /// The connection goes back to its pool when dropped, including on
    /// early returns and errors.
    pub async fn acquire(&self) -> PoolResult<PoolConnection<Postgres>> {
        let pool = self.pool().await?;
        pool.acquire()
            .await
            .map_err(|err| PoolError::from_acquire(err, self.factory().acquire_timeout()))
    }
}
