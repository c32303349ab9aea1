//! Configuration and settings management for GarmentKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Designer behaviour (canvas size, clamp and membership policies)
//! - Text tools (fonts, palette, size bounds)
//! - Artwork upload limits
//! - Pricing and ordering

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How the constraint engine shrinks an object that is larger than its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleClampMode {
    /// Clamp horizontal and vertical scale separately (may distort).
    #[default]
    Independent,
    /// Shrink both axes by the same factor, preserving aspect ratio.
    Uniform,
}

impl std::fmt::Display for ScaleClampMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Independent => write!(f, "independent"),
            Self::Uniform => write!(f, "uniform"),
        }
    }
}

/// Tie-break when several areas contain an object's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipPolicy {
    /// First containing area in list order.
    #[default]
    FirstMatch,
    /// Containing area with the smallest surface; list order breaks ties.
    SmallestContaining,
}

impl std::fmt::Display for MembershipPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstMatch => write!(f, "first_match"),
            Self::SmallestContaining => write!(f, "smallest_containing"),
        }
    }
}

/// Designer surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerSettings {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub scale_clamp: ScaleClampMode,
    pub membership: MembershipPolicy,
    /// Edge of the box new artwork is fitted into.
    pub default_artwork_size: f64,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            canvas_width: 400.0,
            canvas_height: 500.0,
            scale_clamp: ScaleClampMode::default(),
            membership: MembershipPolicy::default(),
            default_artwork_size: 100.0,
        }
    }
}

/// Text tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub fonts: Vec<String>,
    pub colors: Vec<String>,
    pub default_font_size: f64,
    pub min_font_size: f64,
    pub max_font_size: f64,
    pub font_size_step: f64,
    pub max_characters: usize,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            fonts: [
                "Arial",
                "Helvetica",
                "Times New Roman",
                "Georgia",
                "Verdana",
                "Courier New",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            colors: [
                "#000000", "#FFFFFF", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF",
                "#00FFFF", "#FFA500", "#800080",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            default_font_size: 20.0,
            min_font_size: 12.0,
            max_font_size: 72.0,
            font_size_step: 2.0,
            max_characters: 100,
        }
    }
}

impl TextSettings {
    pub fn default_font(&self) -> &str {
        self.fonts.first().map(String::as_str).unwrap_or("Arial")
    }

    pub fn default_color(&self) -> &str {
        self.colors.first().map(String::as_str).unwrap_or("#000000")
    }

    pub fn clamp_font_size(&self, size: f64) -> f64 {
        if !size.is_finite() {
            return self.default_font_size;
        }
        size.clamp(self.min_font_size, self.max_font_size)
    }
}

/// Artwork upload settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkSettings {
    pub max_bytes: u64,
    /// Lowercase format names as reported by the decoder (`png`, `jpeg`, ...).
    pub allowed_formats: Vec<String>,
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            allowed_formats: ["png", "jpeg", "gif", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ArtworkSettings {
    pub fn allows_format(&self, format: &str) -> bool {
        self.allowed_formats
            .iter()
            .any(|f| f.eq_ignore_ascii_case(format))
    }
}

/// Pricing and ordering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Fee added per placed customization.
    pub per_item_fee: f64,
    pub default_quantity: u32,
    /// Garment colours offered, matched case-insensitively to the variant `color` option.
    pub garment_colors: Vec<String>,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            per_item_fee: 2.50,
            default_quantity: 50,
            garment_colors: vec!["white".to_string(), "black".to_string()],
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub designer: DesignerSettings,
    pub text: TextSettings,
    pub artwork: ArtworkSettings,
    pub pricing: PricingSettings,
}

impl Config {
    /// Create new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("<none>").to_string(),
                ))
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config location: `<config_dir>/garmentkit/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("garmentkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("platform has no config directory".to_string())
            })
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let d = &self.designer;
        if !(d.canvas_width > 0.0 && d.canvas_height > 0.0) {
            return Err(SettingsError::invalid(
                "designer.canvas",
                "dimensions must be > 0",
            ));
        }
        if !(d.default_artwork_size > 0.0) {
            return Err(SettingsError::invalid(
                "designer.default_artwork_size",
                "must be > 0",
            ));
        }

        let t = &self.text;
        if t.fonts.is_empty() {
            return Err(SettingsError::invalid("text.fonts", "must not be empty"));
        }
        if t.colors.is_empty() {
            return Err(SettingsError::invalid("text.colors", "must not be empty"));
        }
        if !(t.min_font_size > 0.0 && t.min_font_size <= t.max_font_size) {
            return Err(SettingsError::invalid(
                "text.font_size",
                "bounds must satisfy 0 < min <= max",
            ));
        }
        if !(t.font_size_step > 0.0) {
            return Err(SettingsError::invalid("text.font_size_step", "must be > 0"));
        }
        if t.max_characters == 0 {
            return Err(SettingsError::invalid("text.max_characters", "must be > 0"));
        }

        if self.artwork.max_bytes == 0 {
            return Err(SettingsError::invalid("artwork.max_bytes", "must be > 0"));
        }

        let p = &self.pricing;
        if !(p.per_item_fee >= 0.0) {
            return Err(SettingsError::invalid(
                "pricing.per_item_fee",
                "must be >= 0",
            ));
        }
        if p.default_quantity == 0 {
            return Err(SettingsError::invalid(
                "pricing.default_quantity",
                "must be >= 1",
            ));
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
