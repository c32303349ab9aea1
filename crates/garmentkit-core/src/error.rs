//! Error handling for GarmentKit
//!
//! Provides error types for the layers of the customization engine:
//! - Designer errors (placement, membership, session state)
//! - Asset errors (artwork read/decode)
//!
//! All error types use `thiserror` for ergonomic error handling. Every
//! variant is local and recoverable: none of them leaves the scene in a
//! partially mutated state.

use thiserror::Error;

/// Designer error type
///
/// Represents failures of placement and session operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignerError {
    /// Externally supplied area metadata failed shape validation
    #[error("Invalid customization area config for view '{view}': {reason}")]
    InvalidAreaConfig {
        /// The view whose override was rejected.
        view: String,
        /// Why the override was rejected.
        reason: String,
    },

    /// An object's bounding box matched no area at serialization time
    #[error("Object {object_id} is not contained in any customization area")]
    UnresolvedMembership {
        /// The dropped object.
        object_id: u64,
    },

    /// Artwork failed to load or decode
    #[error("Artwork failed to load: {0}")]
    AssetLoadFailure(#[from] AssetError),

    /// No area is defined for the current view
    #[error("No customization area defined for view '{view}'")]
    NoActiveArea {
        /// The active view.
        view: String,
    },

    /// The active area does not accept this kind of element
    #[error("Area '{area_id}' does not accept {element} elements")]
    AreaKindMismatch {
        /// The active area.
        area_id: String,
        /// The rejected element kind.
        element: String,
    },

    /// No scene object with this id
    #[error("Unknown scene object {0}")]
    UnknownObject(u64),

    /// Variant id not offered by the product
    #[error("Unknown product variant '{0}'")]
    UnknownVariant(String),

    /// Decoration technique id not in the catalog
    #[error("Unknown decoration technique '{0}'")]
    UnknownTechnique(String),

    /// Text exceeds the configured length limit
    #[error("Text is {length} characters, limit is {max}")]
    TextTooLong {
        /// Submitted length in characters.
        length: usize,
        /// Configured maximum.
        max: usize,
    },

    /// An artwork completion arrived for a request that is no longer valid
    #[error("Artwork request {request} is no longer valid: {reason}")]
    StaleArtworkRequest {
        /// The request id.
        request: String,
        /// Why the request was discarded.
        reason: String,
    },
}

/// Asset error type
///
/// Represents failures while reading or decoding user-supplied artwork.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    /// Reading the artwork source failed
    #[error("Failed to read {source_ref}: {reason}")]
    Read {
        /// The file path or URL.
        source_ref: String,
        /// The underlying failure.
        reason: String,
    },

    /// Artwork exceeds the configured upload limit
    #[error("Artwork is {size} bytes, limit is {max} bytes")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Configured maximum.
        max: u64,
    },

    /// Artwork format is not accepted
    #[error("Unsupported artwork format: {0}")]
    UnsupportedFormat(String),

    /// Artwork bytes could not be decoded
    #[error("Failed to decode artwork: {0}")]
    Decode(String),

    /// Decoded artwork has a zero dimension
    #[error("Artwork has empty dimensions {width}x{height}")]
    EmptyImage {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },
}

/// Main error type for GarmentKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Designer error
    #[error(transparent)]
    Designer(#[from] DesignerError),

    /// Asset error
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a designer error
    pub fn is_designer_error(&self) -> bool {
        matches!(self, Error::Designer(_))
    }

    /// Check if this is an asset error
    pub fn is_asset_error(&self) -> bool {
        matches!(
            self,
            Error::Asset(_) | Error::Designer(DesignerError::AssetLoadFailure(_))
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
