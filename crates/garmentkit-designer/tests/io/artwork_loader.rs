use garmentkit_core::{AssetError, DesignerError};
use garmentkit_designer::{
    ArtworkLoader, ArtworkSource, CustomizationPayload, ImageArtworkLoader, ImageRef,
};
use garmentkit_settings::ArtworkSettings;
use std::path::Path;
use tempfile::TempDir;

use crate::support::session;

fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbaImage::new(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

#[tokio::test]
async fn test_load_png_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logo.png");
    write_png(&path, 64, 32);

    let loader = ImageArtworkLoader::default();
    let artwork = loader.load(&ArtworkSource::file(&path)).await.unwrap();
    assert_eq!((artwork.width, artwork.height), (64, 32));
    assert_eq!(artwork.format, "png");
    assert_eq!(artwork.image_ref, ImageRef::Url(path.display().to_string()));
}

#[tokio::test]
async fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let loader = ImageArtworkLoader::default();
    let err = loader
        .load(&ArtworkSource::file(dir.path().join("missing.png")))
        .await
        .unwrap_err();
    assert!(matches!(err, AssetError::Read { .. }));
}

#[tokio::test]
async fn test_oversized_file_is_rejected_before_decoding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.png");
    write_png(&path, 256, 256);

    let loader = ImageArtworkLoader::new(ArtworkSettings {
        max_bytes: 64,
        ..ArtworkSettings::default()
    });
    let err = loader.load(&ArtworkSource::file(&path)).await.unwrap_err();
    assert!(matches!(err, AssetError::TooLarge { max: 64, .. }));
}

#[tokio::test]
async fn test_non_image_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.png");
    std::fs::write(&path, b"not really a png").unwrap();

    let err = ImageArtworkLoader::default()
        .load(&ArtworkSource::file(&path))
        .await
        .unwrap_err();
    assert!(matches!(err, AssetError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_session_places_loaded_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("art.png");
    write_png(&path, 300, 150);

    let mut s = session();
    let loader = ImageArtworkLoader::new(s.config().artwork.clone());
    s.add_artwork(&loader, &ArtworkSource::file(&path), Some("puff_screen"))
        .await
        .unwrap();

    let doc = s.export_document();
    assert_eq!(doc.len(), 1);
    match &doc.customizations[0].payload {
        CustomizationPayload::Image(image) => {
            assert_eq!(image.image_ref, ImageRef::Url(path.display().to_string()));
            assert!((image.width - 100.0).abs() < 1e-9);
            assert!((image.height - 50.0).abs() < 1e-9);
        }
        other => panic!("expected image payload, got {:?}", other),
    }

    let missing = dir.path().join("gone.png");
    let result = s.add_artwork(&loader, &ArtworkSource::file(missing), None).await;
    assert!(matches!(
        result,
        Err(DesignerError::AssetLoadFailure(AssetError::Read { .. }))
    ));
    assert_eq!(s.scene().object_count(), 1);
}
