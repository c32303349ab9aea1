//! Product records supplied by the catalog collaborator.
//!
//! These mirror the storefront product payload. Every field the designer
//! does not strictly need is defaulted so partial records still load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key carrying the per-product area override.
pub const CUSTOMIZATION_AREAS_KEY: &str = "customization_areas";

/// Variant metadata key carrying a swatch colour.
pub const HEX_COLOR_KEY: &str = "hex_color";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Option title to value, e.g. `"Color" -> "White"`.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// Base unit price. Missing prices are treated as zero by pricing.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ProductRecord {
    /// Returns the raw `customization_areas` override, if present.
    pub fn area_override(&self) -> Option<&serde_json::Value> {
        self.metadata.get(CUSTOMIZATION_AREAS_KEY)
    }

    pub fn variant(&self, id: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == id)
    }
}

impl ProductVariant {
    /// Looks up an option value by title, ignoring case.
    pub fn option(&self, title: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(title))
            .map(|(_, v)| v.as_str())
    }

    pub fn hex_color(&self) -> Option<&str> {
        self.metadata.get(HEX_COLOR_KEY).and_then(|v| v.as_str())
    }
}
