//! # GarmentKit Core
//!
//! Core types shared by the GarmentKit crates.
//! Provides the error taxonomy, geometry primitives, the product records
//! supplied by the catalog, and the event types exchanged with the
//! rendering surface.

pub mod catalog;
pub mod error;
pub mod events;
pub mod geometry;

pub use catalog::{ProductImage, ProductRecord, ProductVariant};
pub use error::{AssetError, DesignerError, Error, Result};
pub use events::{ArtworkRequestId, DesignerEvent, ObjectId, SceneEvent};
pub use geometry::{Bounds, Point, Size, GEOMETRY_EPSILON};
