//! # GarmentKit Designer
//!
//! Placement engine for garment mockup customization.
//!
//! Shoppers place text and artwork on fixed printable areas of a garment
//! view. This crate keeps every placed object inside its area while it is
//! dragged and resized, resolves which area an object belongs to, and
//! derives the area-relative customization document and unit price from
//! the session.
//!
//! Rendering is left to an external scene surface: the session consumes
//! [`SceneEvent`](garmentkit_core::SceneEvent)s and publishes
//! [`DesignerEvent`](garmentkit_core::DesignerEvent)s.

pub mod area;
pub mod assets;
pub mod catalog;
pub mod constraint;
pub mod membership;
pub mod model;
pub mod pricing;
pub mod scene;
pub mod serialization;
pub mod session;

pub use area::{default_areas, parse_area_override, resolve_areas, Area, AreaKind, GarmentView};
pub use assets::{ArtworkLoader, ArtworkSource, DecodedArtwork, ImageArtworkLoader};
pub use catalog::{garment_color_variants, view_image};
pub use constraint::{ConstraintHandler, ConstraintOutcome, ConstraintRegistration};
pub use membership::{active_area, resolve_containing};
pub use model::{
    ApproximateTextMeasure, Element, ElementKind, Geometry, ImageElement, ImageRef, SceneObject,
    TextElement, TextMeasure,
};
pub use pricing::{
    order_total, technique, unit_price, DecorationTechnique, TechniqueSet, TECHNIQUES,
};
pub use scene::{ObjectStore, Scene, SelectionManager};
pub use serialization::{
    serialize, Customization, CustomizationDocument, CustomizationPayload, DocumentSerializer,
    ImageCustomization, TextCustomization,
};
pub use session::{DesignSession, TextUpdate};
