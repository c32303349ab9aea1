//! Customization document serialization.
//!
//! Walks scene objects and produces the normalized, area-relative record
//! handed to pricing and order fulfillment. Membership is re-derived from
//! each object's final bounding box; objects that fit no area are dropped.
//! Serialization never mutates the scene.

use garmentkit_core::{DesignerError, Point};
use garmentkit_settings::MembershipPolicy;
use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::membership::resolve_containing;
use crate::model::{Element, ElementKind, ImageRef, SceneObject};

/// The exported description of one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationDocument {
    pub product_id: String,
    pub variant_id: String,
    pub customizations: Vec<Customization>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    pub area_id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(rename = "data")]
    pub payload: CustomizationPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomizationPayload {
    Text(TextCustomization),
    Image(ImageCustomization),
}

/// Text placement; `x`/`y` is the centre relative to the area origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCustomization {
    pub text: String,
    pub font: String,
    pub color: String,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    #[serde(default = "unit_scale", skip_serializing_if = "is_unit_scale")]
    pub scale_x: f64,
    #[serde(default = "unit_scale", skip_serializing_if = "is_unit_scale")]
    pub scale_y: f64,
}

/// Image placement; `x`/`y` is the centre relative to the area origin and
/// `width`/`height` the rendered size before rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCustomization {
    pub image_ref: ImageRef,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees.
    #[serde(default)]
    pub rotation: f64,
}

fn unit_scale() -> f64 {
    1.0
}

fn is_unit_scale(v: &f64) -> bool {
    *v == 1.0
}

impl Customization {
    /// Area-relative centre of the element.
    pub fn relative_center(&self) -> Point {
        match &self.payload {
            CustomizationPayload::Text(t) => Point::new(t.x, t.y),
            CustomizationPayload::Image(i) => Point::new(i.x, i.y),
        }
    }

    /// Absolute canvas centre when replayed into `area`.
    pub fn absolute_center(&self, area: &Area) -> Point {
        let rel = self.relative_center();
        area.origin().offset(rel.x, rel.y)
    }
}

impl CustomizationDocument {
    pub fn is_empty(&self) -> bool {
        self.customizations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.customizations.len()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Serializes scene objects against a list of candidate areas.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentSerializer {
    policy: MembershipPolicy,
}

impl DocumentSerializer {
    pub fn new(policy: MembershipPolicy) -> Self {
        Self { policy }
    }

    /// Describes one object, or reports that it fits no area.
    pub fn customization_for(
        &self,
        object: &SceneObject,
        areas: &[Area],
    ) -> Result<Customization, DesignerError> {
        let area = resolve_containing(&object.bounds(), areas, self.policy).ok_or(
            DesignerError::UnresolvedMembership {
                object_id: object.id,
            },
        )?;
        let rel = object.center().relative_to(area.origin());

        let payload = match &object.element {
            Element::Text(t) => CustomizationPayload::Text(TextCustomization {
                text: t.text.clone(),
                font: t.font_family.clone(),
                color: t.fill_color.clone(),
                size: t.font_size,
                x: rel.x,
                y: rel.y,
                scale_x: object.geometry.scale_x,
                scale_y: object.geometry.scale_y,
            }),
            Element::Image(img) => {
                let size = object.scaled_size();
                CustomizationPayload::Image(ImageCustomization {
                    image_ref: img.source.clone(),
                    x: rel.x,
                    y: rel.y,
                    width: size.width,
                    height: size.height,
                    rotation: img.rotation,
                })
            }
        };

        Ok(Customization {
            area_id: area.id.clone(),
            kind: object.kind(),
            payload,
        })
    }

    /// Describes every object that resolves to an area, in input order.
    pub fn customizations<'a>(
        &self,
        objects: impl IntoIterator<Item = &'a SceneObject>,
        areas: &[Area],
    ) -> Vec<Customization> {
        objects
            .into_iter()
            .filter_map(|object| match self.customization_for(object, areas) {
                Ok(c) => Some(c),
                Err(e) => {
                    tracing::warn!("Dropping object from customization document: {}", e);
                    None
                }
            })
            .collect()
    }

    pub fn serialize<'a>(
        &self,
        objects: impl IntoIterator<Item = &'a SceneObject>,
        areas: &[Area],
        product_id: &str,
        variant_id: &str,
    ) -> CustomizationDocument {
        CustomizationDocument {
            product_id: product_id.to_string(),
            variant_id: variant_id.to_string(),
            customizations: self.customizations(objects, areas),
        }
    }
}

/// Serializes with first-match membership.
pub fn serialize<'a>(
    objects: impl IntoIterator<Item = &'a SceneObject>,
    areas: &[Area],
    product_id: &str,
    variant_id: &str,
) -> CustomizationDocument {
    DocumentSerializer::default().serialize(objects, areas, product_id, variant_id)
}
