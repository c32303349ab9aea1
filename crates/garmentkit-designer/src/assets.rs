//! Artwork loading.
//!
//! Loading is the only suspension point of a session. Loaders read and
//! validate the artwork and report its natural pixel size together with a
//! reference the document can carry; pixel data never reaches the scene.

use async_trait::async_trait;
use garmentkit_core::AssetError;
use garmentkit_settings::ArtworkSettings;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::PathBuf;

use crate::model::ImageRef;

/// Where a piece of artwork is read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ArtworkSource {
    /// A local file; the document references it by path.
    File { path: PathBuf },
    /// Bytes already uploaded elsewhere, referenced by `content_ref`.
    Bytes {
        content_ref: String,
        #[serde(skip)]
        data: Vec<u8>,
    },
}

impl ArtworkSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ArtworkSource::File { path: path.into() }
    }

    pub fn bytes(content_ref: impl Into<String>, data: Vec<u8>) -> Self {
        ArtworkSource::Bytes {
            content_ref: content_ref.into(),
            data,
        }
    }

    pub fn image_ref(&self) -> ImageRef {
        match self {
            ArtworkSource::File { path } => ImageRef::Url(path.display().to_string()),
            ArtworkSource::Bytes { content_ref, .. } => ImageRef::Content(content_ref.clone()),
        }
    }

    fn describe(&self) -> String {
        match self {
            ArtworkSource::File { path } => path.display().to_string(),
            ArtworkSource::Bytes { content_ref, .. } => content_ref.clone(),
        }
    }
}

/// Validated artwork ready to be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedArtwork {
    pub image_ref: ImageRef,
    pub width: u32,
    pub height: u32,
    /// Lowercase format name, e.g. `png`.
    pub format: String,
}

#[async_trait]
pub trait ArtworkLoader: Send + Sync {
    async fn load(&self, source: &ArtworkSource) -> Result<DecodedArtwork, AssetError>;
}

/// Reads artwork from disk or memory and decodes its header with `image`.
#[derive(Debug, Clone, Default)]
pub struct ImageArtworkLoader {
    settings: ArtworkSettings,
}

impl ImageArtworkLoader {
    pub fn new(settings: ArtworkSettings) -> Self {
        Self { settings }
    }

    fn check_size(&self, size: u64) -> Result<(), AssetError> {
        if size > self.settings.max_bytes {
            return Err(AssetError::TooLarge {
                size,
                max: self.settings.max_bytes,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ArtworkLoader for ImageArtworkLoader {
    async fn load(&self, source: &ArtworkSource) -> Result<DecodedArtwork, AssetError> {
        let data = match source {
            ArtworkSource::File { path } => {
                let read_err = |e: std::io::Error| AssetError::Read {
                    source_ref: path.display().to_string(),
                    reason: e.to_string(),
                };
                let meta = tokio::fs::metadata(path).await.map_err(read_err)?;
                self.check_size(meta.len())?;
                tokio::fs::read(path).await.map_err(read_err)?
            }
            ArtworkSource::Bytes { data, .. } => data.clone(),
        };
        self.check_size(data.len() as u64)?;

        let (format, width, height) = tokio::task::spawn_blocking(move || probe(&data))
            .await
            .map_err(|e| AssetError::Decode(e.to_string()))??;

        if !self.settings.allows_format(&format) {
            return Err(AssetError::UnsupportedFormat(format));
        }
        if width == 0 || height == 0 {
            return Err(AssetError::EmptyImage { width, height });
        }

        tracing::debug!(
            "Loaded artwork {} ({}, {}x{})",
            source.describe(),
            format,
            width,
            height
        );
        Ok(DecodedArtwork {
            image_ref: source.image_ref(),
            width,
            height,
            format,
        })
    }
}

fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "png".to_string(),
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        other => format!("{:?}", other).to_ascii_lowercase(),
    }
}

/// Detects the format from magic bytes and reads the dimensions.
fn probe(data: &[u8]) -> Result<(String, u32, u32), AssetError> {
    let format = image::guess_format(data)
        .map_err(|_| AssetError::UnsupportedFormat("unknown".to_string()))?;
    let (width, height) = image::ImageReader::with_format(Cursor::new(data), format)
        .into_dimensions()
        .map_err(|e| AssetError::Decode(e.to_string()))?;
    Ok((format_name(format), width, height))
}
