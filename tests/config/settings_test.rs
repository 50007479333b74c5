use std::fs;
use std::time::Duration;

use gallery::config::{PgConnectionConfig, Settings, SettingsError, SslMode};
use gallery::GalleryError;

#[test]
fn test_full_file_round_trip() {
    let path = std::env::temp_dir().join(format!("gallery-settings-{}.toml", std::process::id()));
    fs::write(
        &path,
        r#"
[table]
schema = "vision"
name = "frames"

[pool]
min_size = 0
max_size = 3
acquire_timeout_secs = 5

[credential]
refresh_interval_secs = 300

[volume]
base_path = "/Volumes/prod/vision/frames"
request_timeout_secs = 20
thumbnail_size = [64, 64]

[display]
items_per_page = 12
"#,
    )
    .unwrap();

    let settings = Settings::from_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(settings.table.schema, "vision");
    assert_eq!(settings.table.name, "frames");
    assert_eq!(settings.table.path_column, "path");
    assert_eq!(settings.pool.min_size, 0);
    assert_eq!(settings.pool.max_size, 3);
    assert_eq!(settings.pool.acquire_timeout(), Duration::from_secs(5));
    assert_eq!(settings.credential.refresh_interval(), Duration::from_secs(300));
    assert_eq!(settings.volume.request_timeout(), Duration::from_secs(20));
    assert_eq!(settings.volume.thumbnail_size, [64, 64]);
    assert_eq!(settings.display.items_per_page, 12);
}

#[test]
fn test_env_expansion_in_paths() {
    std::env::set_var("GALLERY_IT_CATALOG", "staging");
    let settings =
        Settings::from_toml("[volume]\nbase_path = \"/Volumes/${GALLERY_IT_CATALOG}/app/img\"\n")
            .unwrap();
    assert_eq!(settings.volume.base_path, "/Volumes/staging/app/img");
    std::env::remove_var("GALLERY_IT_CATALOG");
}

#[test]
fn test_missing_env_var_is_configuration_error() {
    let err = Settings::from_toml("[table]\nschema = \"${GALLERY_IT_UNSET_SCHEMA}\"\n").unwrap_err();
    assert!(matches!(err, SettingsError::MissingEnvVar(ref v) if v == "GALLERY_IT_UNSET_SCHEMA"));

    let err = GalleryError::from(err);
    assert!(matches!(err, GalleryError::Configuration(_)));
    assert!(!err.is_retriable());
}

#[test]
fn test_validation_failures() {
    for toml in [
        "[pool]\nmax_size = 0\nmin_size = 0\n",
        "[pool]\nmin_size = 11\n",
        "[credential]\nrefresh_interval_secs = 0\n",
        "[table]\nname = \"\"\n",
        "[volume]\nbase_path = \"images\"\n",
        "[display]\nitems_per_page = 100\n",
    ] {
        assert!(
            matches!(Settings::from_toml(toml), Err(SettingsError::InvalidConfig(_))),
            "{} should fail validation",
            toml
        );
    }
}

#[test]
fn test_malformed_toml() {
    assert!(Settings::from_toml("[pool\nmax_size = 1").is_err());
    assert!(Settings::from_toml("[pool]\nmax_size = \"ten\"\n").is_err());
}

#[test]
fn test_connection_from_lookup() {
    let config = PgConnectionConfig::from_lookup(|name| match name {
        "PGHOST" => Some("db.example.com".to_string()),
        "PGDATABASE" => Some("gallery".to_string()),
        "PGUSER" => Some("svc-gallery".to_string()),
        "PGPORT" => Some("5432".to_string()),
        "DATABRICKS_HOST" => Some("adb-1.azuredatabricks.net".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.host, "db.example.com");
    assert_eq!(config.port, 5432);
    assert_eq!(config.ssl_mode, SslMode::Require);
    assert_eq!(config.workspace_host, "https://adb-1.azuredatabricks.net");
    assert!(!config.describe().contains("password"));
}

#[test]
fn test_connection_rejects_bad_port() {
    let err = PgConnectionConfig::from_lookup(|name| match name {
        "PGPORT" => Some("0".to_string()),
        _ => Some("x".to_string()),
    })
    .unwrap_err();
    assert!(err.to_string().contains("Invalid port"));
}

#[test]
fn test_connection_lists_every_missing_variable() {
    let err = PgConnectionConfig::from_lookup(|_| None).unwrap_err();
    let message = GalleryError::from(err).to_string();
    for name in ["PGHOST", "PGPORT", "PGDATABASE", "PGUSER", "DATABRICKS_HOST"] {
        assert!(message.contains(name), "{} missing from {}", name, message);
    }
}
