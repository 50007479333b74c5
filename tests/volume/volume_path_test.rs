use gallery::config::Settings;
use gallery::volume::{has_image_extension, is_volume_path, normalize_volume_path, VolumeError};
use gallery::GalleryError;

const BASE: &str = "/Volumes/demos/image_app/images";

fn normalize(raw: &str) -> Result<String, VolumeError> {
    normalize_volume_path(raw, BASE)
}

#[test]
fn test_accepted_spellings() {
    let cases = [
        ("dbfs:/Volumes/main/app/images/cat.png", "/Volumes/main/app/images/cat.png"),
        ("/Volumes/main/app/images/cat.png", "/Volumes/main/app/images/cat.png"),
        ("cat.png", "/Volumes/demos/image_app/images/cat.png"),
        ("Cat.JPG", "/Volumes/demos/image_app/images/Cat.JPG"),
        ("/mnt/sync/Volumes/main/app/images/cat.gif", "/Volumes/main/app/images/cat.gif"),
        ("  /Volumes/main/app/images/dog.webp\t", "/Volumes/main/app/images/dog.webp"),
    ];

    for (raw, expected) in cases {
        assert_eq!(normalize(raw).unwrap(), expected, "input {:?}", raw);
    }
}

#[test]
fn test_rejected_spellings() {
    for raw in [
        "",
        "   ",
        "12345",
        "cat",
        "notes.txt",
        "/etc/passwd",
        "images/cat.png",
        "dbfs:/tmp/cat.png",
        "s3://bucket/cat.png",
    ] {
        match normalize(raw) {
            Err(VolumeError::InvalidPath { path, .. }) => assert_eq!(path, raw),
            other => panic!("{:?} should be rejected, got {:?}", raw, other),
        }
    }
}

#[test]
fn test_base_path_from_settings() {
    let settings = Settings::from_toml(
        "[volume]\nbase_path = \"/Volumes/prod/vision/frames/\"\n",
    )
    .unwrap();
    assert_eq!(
        normalize_volume_path("frame_0001.bmp", &settings.volume.base_path).unwrap(),
        "/Volumes/prod/vision/frames/frame_0001.bmp"
    );
}

#[test]
fn test_invalid_path_is_not_retriable() {
    let err: GalleryError = normalize("12345").unwrap_err().into();
    assert!(matches!(err, GalleryError::InvalidPath { .. }));
    assert!(!err.is_retriable());
}

#[test]
fn test_image_extensions() {
    assert!(has_image_extension("a.jpeg"));
    assert!(has_image_extension("a.b.PNG"));
    assert!(!has_image_extension(".png"));
    assert!(!has_image_extension("png"));
    assert!(!has_image_extension("a.tiff"));
}

#[test]
fn test_is_volume_path() {
    assert!(is_volume_path("/Volumes/a/b/c/d.png"));
    assert!(is_volume_path("dbfs:/Volumes/a/b/c/d.png"));
    assert!(!is_volume_path("d.png"));
    assert!(!is_volume_path("/mnt/Volumes/a/b/c/d.png"));
}
