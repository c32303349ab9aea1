//! Events exchanged with the rendering surface and the UI shell.
//!
//! [`SceneEvent`] flows in: raw interactions reported by the rendering
//! surface, carrying the object's latest unconstrained geometry.
//! [`DesignerEvent`] flows out: notifications for redraw, editor and
//! status collaborators.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;

/// Identity of a scene object within one session.
pub type ObjectId = u64;

/// Identity of a pending add-artwork request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtworkRequestId(Uuid);

impl ArtworkRequestId {
    /// Create a new unique request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ArtworkRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ArtworkRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Artwork({})", &self.0.to_string()[..8])
    }
}

/// Raw interaction reported by the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SceneEvent {
    /// Object dragged; `center` is the unconstrained new centre.
    Moving { id: ObjectId, center: Point },
    /// Object resized through a handle.
    Scaling {
        id: ObjectId,
        center: Point,
        scale_x: f64,
        scale_y: f64,
    },
    /// Active selection changed.
    SelectionChanged { id: Option<ObjectId> },
    /// The surface removed an object (e.g. delete key).
    ObjectRemoved { id: ObjectId },
}

impl SceneEvent {
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            SceneEvent::Moving { id, .. }
            | SceneEvent::Scaling { id, .. }
            | SceneEvent::ObjectRemoved { id } => Some(*id),
            SceneEvent::SelectionChanged { id } => *id,
        }
    }
}

/// Notification published by a design session.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignerEvent {
    ObjectAdded { id: ObjectId, area_id: String },
    ObjectRemoved { id: ObjectId },
    /// The constraint engine corrected an object's geometry.
    RedrawRequested { id: ObjectId },
    SelectionChanged { id: Option<ObjectId> },
    EditorOpened { id: ObjectId },
    EditorClosed { id: ObjectId },
    ViewChanged { view: String },
    ArtworkFailed {
        request: ArtworkRequestId,
        reason: String,
    },
}
