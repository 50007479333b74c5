//! Configuration module for the gallery.
//!
//! Handles connection configuration from the environment and the optional
//! TOML settings file.

mod connection;
mod settings;

pub use connection::{
    env_snapshot, normalize_workspace_host, snapshot_of, validate_required_env, ConnectionError,
    PgConnectionConfig, SslMode, DEFAULT_APPLICATION_NAME, REQUIRED_ENV_VARS,
};
pub use settings::{
    expand_env_vars, CredentialSettings, DisplaySettings, PoolSettings, Settings, SettingsError,
    TableSettings, VolumeSettings,
};
