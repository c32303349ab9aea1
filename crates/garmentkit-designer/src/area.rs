//! Printable areas per garment view.
//!
//! Areas come from the product's `customization_areas` metadata when it
//! validates, otherwise from the built-in set for the view. The first area
//! of a view is its active placement target.

use garmentkit_core::{Bounds, DesignerError, Point};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Garment views the designer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentView {
    Front,
    Back,
    Neck,
}

impl GarmentView {
    pub const ALL: [GarmentView; 3] = [GarmentView::Front, GarmentView::Back, GarmentView::Neck];

    pub fn as_str(&self) -> &'static str {
        match self {
            GarmentView::Front => "front",
            GarmentView::Back => "back",
            GarmentView::Neck => "neck",
        }
    }
}

impl Default for GarmentView {
    fn default() -> Self {
        GarmentView::Front
    }
}

impl std::fmt::Display for GarmentView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GarmentView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(GarmentView::Front),
            "back" => Ok(GarmentView::Back),
            "neck" => Ok(GarmentView::Neck),
            other => Err(format!("unknown garment view '{}'", other)),
        }
    }
}

/// What an area accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaKind {
    Text,
    Image,
    Both,
}

impl AreaKind {
    pub fn accepts_text(&self) -> bool {
        matches!(self, AreaKind::Text | AreaKind::Both)
    }

    pub fn accepts_image(&self) -> bool {
        matches!(self, AreaKind::Image | AreaKind::Both)
    }
}

/// A named rectangular printable region, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(alias = "type")]
    pub kind: AreaKind,
}

impl Area {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        kind: AreaKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x,
            y,
            width,
            height,
            kind,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("area id must not be empty".to_string());
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(format!(
                "area '{}' must have positive size, got {}x{}",
                self.id, self.width, self.height
            ));
        }
        Ok(())
    }
}

/// Built-in areas on the 400x500 mockup canvas.
pub fn default_areas(view: GarmentView) -> Vec<Area> {
    match view {
        GarmentView::Front => vec![Area::new(
            "front-center",
            "Front Center",
            125.0,
            140.0,
            150.0,
            200.0,
            AreaKind::Both,
        )],
        GarmentView::Back => vec![Area::new(
            "back-center",
            "Back Center",
            125.0,
            100.0,
            150.0,
            200.0,
            AreaKind::Both,
        )],
        GarmentView::Neck => Vec::new(),
    }
}

/// Parses the override for `view`.
///
/// The override is either an object keyed by view name or a flat array that
/// applies to every view. Returns `Ok(None)` when it says nothing about `view`.
pub fn parse_area_override(
    view: GarmentView,
    value: &serde_json::Value,
) -> Result<Option<Vec<Area>>, DesignerError> {
    let invalid = |reason: String| DesignerError::InvalidAreaConfig {
        view: view.to_string(),
        reason,
    };

    let entries = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(map) => match map.get(view.as_str()) {
            Some(entries) => entries,
            None => return Ok(None),
        },
        serde_json::Value::Null => return Ok(None),
        other => return Err(invalid(format!("expected array or object, got {}", other))),
    };

    let areas: Vec<Area> =
        serde_json::from_value(entries.clone()).map_err(|e| invalid(e.to_string()))?;
    for area in &areas {
        area.validate().map_err(invalid)?;
    }
    Ok(Some(areas))
}

/// Resolves the ordered area list for `view`.
///
/// A valid override wins; an invalid one is logged and the built-in set is
/// used instead. Never fails.
pub fn resolve_areas(view: GarmentView, override_value: Option<&serde_json::Value>) -> Vec<Area> {
    let Some(value) = override_value else {
        return default_areas(view);
    };

    match parse_area_override(view, value) {
        Ok(Some(areas)) => {
            tracing::debug!("Using {} override area(s) for {}", areas.len(), view);
            areas
        }
        Ok(None) => default_areas(view),
        Err(e) => {
            tracing::warn!("{}; falling back to default areas", e);
            default_areas(view)
        }
    }
}
