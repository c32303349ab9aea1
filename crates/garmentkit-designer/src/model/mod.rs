//! Scene objects placed by the shopper.
//!
//! A [`SceneObject`] is a closed union over text and image elements with
//! common placement state. `center` is the geometric centre of the object;
//! the scale factors apply to the element's natural size.

mod image;
mod text;

pub use image::{ImageElement, ImageRef};
pub use text::{ApproximateTextMeasure, TextElement, TextMeasure};

use garmentkit_core::{Bounds, ObjectId, Point, Size};
use serde::{Deserialize, Serialize};

use crate::area::GarmentView;
use crate::constraint::ConstraintRegistration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Text => write!(f, "text"),
            ElementKind::Image => write!(f, "image"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(_) => ElementKind::Text,
            Element::Image(_) => ElementKind::Image,
        }
    }

    pub fn natural_size(&self) -> Size {
        match self {
            Element::Text(t) => t.natural_size,
            Element::Image(i) => i.natural_size(),
        }
    }

    /// Rotation in degrees. Text is never rotated.
    pub fn rotation(&self) -> f64 {
        match self {
            Element::Text(_) => 0.0,
            Element::Image(i) => i.rotation,
        }
    }
}

/// Position and scale, the part of an object the surface mutates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub center: Point,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Geometry {
    pub fn new(center: Point, scale_x: f64, scale_y: f64) -> Self {
        Self {
            center,
            scale_x,
            scale_y,
        }
    }
}

/// Axis-aligned bounds of a `natural` box scaled by `geometry` and rotated
/// by `rotation` degrees about its centre.
pub fn element_bounds(natural: Size, geometry: &Geometry, rotation: f64) -> Bounds {
    let scaled = natural.scaled(geometry.scale_x.abs(), geometry.scale_y.abs());
    if rotation.rem_euclid(360.0) == 0.0 {
        return Bounds::centered(geometry.center, scaled.width, scaled.height);
    }
    let (sin, cos) = rotation.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Bounds::centered(
        geometry.center,
        scaled.width * cos + scaled.height * sin,
        scaled.width * sin + scaled.height * cos,
    )
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: ObjectId,
    /// View the object was created under.
    pub view: GarmentView,
    /// Area bound at creation time.
    pub area_id: String,
    pub geometry: Geometry,
    pub element: Element,
    pub(crate) constraint: Option<ConstraintRegistration>,
}

impl SceneObject {
    pub fn new(
        id: ObjectId,
        view: GarmentView,
        area_id: impl Into<String>,
        center: Point,
        element: Element,
    ) -> Self {
        Self {
            id,
            view,
            area_id: area_id.into(),
            geometry: Geometry::new(center, 1.0, 1.0),
            element,
            constraint: None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.element.kind()
    }

    pub fn center(&self) -> Point {
        self.geometry.center
    }

    pub fn bounds(&self) -> Bounds {
        element_bounds(
            self.element.natural_size(),
            &self.geometry,
            self.element.rotation(),
        )
    }

    /// Rendered size before rotation: natural size times scale.
    pub fn scaled_size(&self) -> Size {
        self.element
            .natural_size()
            .scaled(self.geometry.scale_x, self.geometry.scale_y)
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match &self.element {
            Element::Text(t) => Some(t),
            Element::Image(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextElement> {
        match &mut self.element {
            Element::Text(t) => Some(t),
            Element::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageElement> {
        match &self.element {
            Element::Image(i) => Some(i),
            Element::Text(_) => None,
        }
    }

    /// Registration currently installed on this object, if any.
    pub fn constraint(&self) -> Option<&ConstraintRegistration> {
        self.constraint.as_ref()
    }
}
