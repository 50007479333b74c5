//! Database connection configuration.
//!
//! Supports configuration via environment variables:
//! - `DATABRICKS_HOST`: Workspace URL (identity service and Files API)
//! - `PGDATABASE`: Database name
//! - `PGUSER`: Database role the bearer token is issued for
//! - `PGHOST`: Database server hostname
//! - `PGPORT`: Port
//! - `PGSSLMODE`: TLS mode (optional, default `require`)
//! - `PGAPPNAME`: `application_name` reported to the server (optional)

use std::collections::BTreeMap;
use std::env;
use std::fmt;

/// Variables that must be present before any connection is attempted.
pub const REQUIRED_ENV_VARS: [&str; 5] = [
    "DATABRICKS_HOST",
    "PGDATABASE",
    "PGUSER",
    "PGHOST",
    "PGPORT",
];

/// Application name used when `PGAPPNAME` is unset.
pub const DEFAULT_APPLICATION_NAME: &str = "volume-gallery";

/// Error type for connection configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),

    #[error("Invalid port {0:?}: expected an integer between 1 and 65535")]
    InvalidPort(String),

    #[error("Unsupported sslmode: {0}. Supported: disable, allow, prefer, require, verify-ca, verify-full")]
    UnsupportedSslMode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// TLS negotiation mode, mirroring libpq's `sslmode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    Disable,
    Allow,
    Prefer,
    #[default]
    Require,
    VerifyCa,
    VerifyFull,
}

impl SslMode {
    /// Parse an sslmode string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConnectionError> {
        match s.trim().to_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "allow" => Ok(SslMode::Allow),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" | "verify_ca" => Ok(SslMode::VerifyCa),
            "verify-full" | "verify_full" => Ok(SslMode::VerifyFull),
            other => Err(ConnectionError::UnsupportedSslMode(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Allow => "allow",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database connection configuration.
///
/// There is no password field: it is the rotating bearer token and
/// is supplied by the credential provider at pool-build time.
#[derive(Debug, Clone, PartialEq)]
pub struct PgConnectionConfig {
    /// Workspace URL, without trailing slash.
    pub workspace_host: String,
    /// Server hostname.
    pub host: String,
    /// Port.
    pub port: u16,
    /// Database name.
    pub database: String,
    /// Role name.
    pub username: String,
    /// TLS mode.
    pub ssl_mode: SslMode,
    /// `application_name` connection parameter.
    pub application_name: String,
}

impl PgConnectionConfig {
    /// Load configuration from environment variables.
    ///
    /// Every missing required variable is reported at once.
    pub fn from_env() -> Result<Self, ConnectionError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConnectionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing = missing_vars(&lookup);
        if !missing.is_empty() {
            return Err(ConnectionError::MissingEnvVars(missing));
        }

        // Presence was checked above.
        let get = |name: &str| lookup(name).unwrap_or_default().trim().to_string();

        let port_str = get("PGPORT");
        let port: u16 = port_str
            .parse()
            .ok()
            .filter(|p| *p != 0)
            .ok_or(ConnectionError::InvalidPort(port_str))?;

        let ssl_mode = match lookup("PGSSLMODE").filter(|s| !s.trim().is_empty()) {
            Some(mode) => SslMode::from_str(&mode)?,
            None => SslMode::default(),
        };

        let application_name = lookup("PGAPPNAME")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_APPLICATION_NAME.to_string());

        Ok(Self {
            workspace_host: normalize_workspace_host(&get("DATABRICKS_HOST")),
            host: get("PGHOST"),
            port,
            database: get("PGDATABASE"),
            username: get("PGUSER"),
            ssl_mode,
            application_name,
        })
    }

    /// Describe the target without credentials, for logs and diagnostics.
    pub fn describe(&self) -> String {
        format!(
            "postgres://{}@{}:{}/{}?sslmode={}&application_name={}",
            self.username, self.host, self.port, self.database, self.ssl_mode, self.application_name
        )
    }
}

/// Return the name of every required variable that is unset or empty.
pub fn validate_required_env() -> Vec<String> {
    missing_vars(&|name: &str| env::var(name).ok())
}

fn missing_vars<F>(lookup: &F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_ENV_VARS
        .iter()
        .filter(|name| {
            lookup(name)
                .map(|v| v.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|name| name.to_string())
        .collect()
}

/// Ensure the workspace host has a scheme and no trailing slash.
pub fn normalize_workspace_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Snapshot of the gallery-relevant environment for diagnostics.
///
/// Values of variables that look like secrets are masked.
pub fn env_snapshot() -> BTreeMap<String, String> {
    snapshot_of(env::vars())
}

/// Keep gallery-relevant variables from `vars`, masking secret values.
pub fn snapshot_of<I>(vars: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    vars.into_iter()
        .filter(|(k, _)| {
            k.starts_with("PG") || k.starts_with("DATABRICKS_") || k.starts_with("GALLERY_")
        })
        .map(|(k, v)| {
            let masked = if is_secret_name(&k) {
                "****".to_string()
            } else {
                v
            };
            (k, masked)
        })
        .collect()
}

fn is_secret_name(name: &str) -> bool {
    let upper = name.to_uppercase();
    ["SECRET", "TOKEN", "PASSWORD"]
        .iter()
        .any(|marker| upper.contains(marker))
}
