//! Volume path normalization.

use super::error::{VolumeError, VolumeResult};

/// Segment every volume path starts with.
pub const VOLUMES_MARKER: &str = "/Volumes/";

/// Storage-root prefix some tables store in front of volume paths.
pub const DBFS_PREFIX: &str = "dbfs:";

/// Extensions accepted for bare file names.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Turn a stored path into a `/Volumes/...` path the Files API accepts.
///
/// | input | result |
/// |---|---|
/// | `dbfs:/Volumes/a/b/c.png` | `/Volumes/a/b/c.png` |
/// | `/Volumes/a/b/c.png` | unchanged |
/// | `c.png` | `{base}/c.png` |
/// | `/foo/Volumes/a/b/c.png` | `/Volumes/a/b/c.png` |
/// | `12345`, `c`, `/etc/passwd` | rejected |
pub fn normalize_volume_path(raw: &str, base: &str) -> VolumeResult<String> {
    let path = raw.trim();

    if path.is_empty() {
        return Err(VolumeError::invalid(raw, "empty path"));
    }

    if let Some(rest) = path.strip_prefix(DBFS_PREFIX) {
        if rest.starts_with(VOLUMES_MARKER) {
            return Ok(rest.to_string());
        }
    }

    if path.starts_with(VOLUMES_MARKER) {
        return Ok(path.to_string());
    }

    if path.chars().all(|c| c.is_ascii_digit()) {
        return Err(VolumeError::invalid(raw, "looks like a numeric id, not a path"));
    }

    if !path.contains('/') {
        if has_image_extension(path) {
            return Ok(format!("{}/{}", base.trim_end_matches('/'), path));
        }
        return Err(VolumeError::invalid(
            raw,
            "bare file name without a recognized image extension",
        ));
    }

    if path.starts_with('/') {
        return match path.find(VOLUMES_MARKER) {
            Some(idx) => Ok(path[idx..].to_string()),
            None => Err(VolumeError::invalid(raw, "absolute path outside /Volumes/")),
        };
    }

    Err(VolumeError::invalid(
        raw,
        "expected /Volumes/<catalog>/<schema>/<volume>/<file> or dbfs:/Volumes/...",
    ))
}

/// Whether the file name ends in a recognized image extension.
pub fn has_image_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        _ => false,
    }
}

/// Quick check that a stored path already names a volume file.
pub fn is_volume_path(path: &str) -> bool {
    let path = path.trim();
    path.starts_with(VOLUMES_MARKER)
        || path
            .strip_prefix(DBFS_PREFIX)
            .is_some_and(|rest| rest.starts_with(VOLUMES_MARKER))
}
