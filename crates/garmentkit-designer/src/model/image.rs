use garmentkit_core::Size;
use serde::{Deserialize, Serialize};

/// Where placed artwork comes from. Never raw pixel data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRef {
    Url(String),
    /// Opaque reference issued by the upload collaborator.
    Content(String),
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageRef::Url(url) => write!(f, "{}", url),
            ImageRef::Content(id) => write!(f, "content:{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub source: ImageRef,
    pub natural_width: f64,
    pub natural_height: f64,
    /// Rotation in degrees about the element centre.
    pub rotation: f64,
}

impl ImageElement {
    pub fn new(source: ImageRef, natural_width: f64, natural_height: f64) -> Self {
        Self {
            source,
            natural_width,
            natural_height,
            rotation: 0.0,
        }
    }

    pub fn natural_size(&self) -> Size {
        Size::new(self.natural_width, self.natural_height)
    }
}
