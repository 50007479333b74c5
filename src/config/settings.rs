//! TOML-based configuration for the gallery.
//!
//! Supports a config file (gallery.toml) with environment variable expansion.
//! Every section is optional; missing keys fall back to the defaults below.
//!
//! Example configuration:
//! ```toml
//! [table]
//! schema = "example"
//! name = "image_predictions"
//! path_column = "path"
//!
//! [pool]
//! min_size = 2
//! max_size = 10
//! acquire_timeout_secs = 30
//!
//! [credential]
//! refresh_interval_secs = 900
//!
//! [volume]
//! base_path = "/Volumes/${CATALOG}/image_app/images"
//! request_timeout_secs = 10
//!
//! [display]
//! items_per_page = 24
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Location and column names of the image table.
    pub table: TableSettings,

    /// Connection pool settings.
    pub pool: PoolSettings,

    /// Bearer token lifetime settings.
    pub credential: CredentialSettings,

    /// Object storage settings.
    pub volume: VolumeSettings,

    /// Paging defaults for presentation.
    pub display: DisplaySettings,
}

/// Table location and column mapping.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TableSettings {
    /// Schema expected to hold the table. Relocated at runtime if wrong.
    pub schema: String,
    /// Table name.
    pub name: String,
    pub path_column: String,
    pub label_column: String,
    /// Mixed-case in the synced table, so it must always be quoted.
    pub label_detail_column: String,
    pub score_column: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            schema: "example".to_string(),
            name: "image_predictions".to_string(),
            path_column: "path".to_string(),
            label_column: "label".to_string(),
            label_detail_column: "labelDetail".to_string(),
            score_column: "score".to_string(),
        }
    }
}

/// Connection pool settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PoolSettings {
    /// Connections kept open while the pool is alive.
    pub min_size: u32,

    /// Upper bound on open connections.
    pub max_size: u32,

    /// How long `acquire` waits on an exhausted pool.
    pub acquire_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            min_size: 2,
            max_size: 10,
            acquire_timeout_secs: 30,
        }
    }
}

impl PoolSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Credential settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CredentialSettings {
    /// A token older than this is refreshed before use.
    pub refresh_interval_secs: u64,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 900,
        }
    }
}

impl CredentialSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// Object storage settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct VolumeSettings {
    /// Directory prefixed to bare image file names.
    pub base_path: String,

    /// Files API route on the workspace host.
    pub files_api_path: String,

    /// Per-download timeout.
    pub request_timeout_secs: u64,

    /// Bounding box for thumbnails, in pixels.
    pub thumbnail_size: [u32; 2],
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            base_path: "/Volumes/demos/image_app/images".to_string(),
            files_api_path: "/api/2.0/fs/files".to_string(),
            request_timeout_secs: 10,
            thumbnail_size: [200, 200],
        }
    }
}

impl VolumeSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Paging defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub items_per_page: u32,
    pub page_size_options: Vec<u32>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            items_per_page: 24,
            page_size_options: vec![12, 24, 48],
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse, expand and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = toml::from_str(content)?;
        settings.expand_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `GALLERY_CONFIG`
    /// 2. `./gallery.toml`
    /// 3. `~/.config/gallery/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("GALLERY_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("gallery.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("gallery").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Expand `${VAR}` references in string settings.
    fn expand_env(&mut self) -> Result<(), SettingsError> {
        let table = &mut self.table;
        for field in [
            &mut table.schema,
            &mut table.name,
            &mut table.path_column,
            &mut table.label_column,
            &mut table.label_detail_column,
            &mut table.score_column,
            &mut self.volume.base_path,
            &mut self.volume.files_api_path,
        ] {
            *field = expand_env_vars(field)?;
        }
        Ok(())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.pool.max_size == 0 {
            return Err(SettingsError::InvalidConfig(
                "pool.max_size must be at least 1".into(),
            ));
        }
        if self.pool.min_size > self.pool.max_size {
            return Err(SettingsError::InvalidConfig(format!(
                "pool.min_size ({}) exceeds pool.max_size ({})",
                self.pool.min_size, self.pool.max_size
            )));
        }
        if self.credential.refresh_interval_secs == 0 {
            return Err(SettingsError::InvalidConfig(
                "credential.refresh_interval_secs must be positive".into(),
            ));
        }
        if self.table.schema.is_empty() || self.table.name.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "table.schema and table.name must be set".into(),
            ));
        }
        if !self.volume.base_path.starts_with("/Volumes/") {
            return Err(SettingsError::InvalidConfig(format!(
                "volume.base_path must start with /Volumes/, got {}",
                self.volume.base_path
            )));
        }
        if !self
            .display
            .page_size_options
            .contains(&self.display.items_per_page)
        {
            return Err(SettingsError::InvalidConfig(format!(
                "display.items_per_page ({}) is not one of {:?}",
                self.display.items_per_page, self.display.page_size_options
            )));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            // $VAR ends at the first non-alphanumeric/underscore
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    var_name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if var_name.is_empty() {
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
