//! # GarmentKit
//!
//! Placement, constraint and serialization engine for garment mockup
//! customization.
//!
//! ## Architecture
//!
//! GarmentKit is organized as a workspace with multiple crates:
//!
//! 1. **garmentkit-core** - Error taxonomy, geometry, catalog records, events
//! 2. **garmentkit-settings** - Configuration model and persistence
//! 3. **garmentkit-designer** - Areas, constraints, membership, documents, pricing, sessions
//! 4. **garmentkit** - Batch runner that replays scripted editing sessions
//!
//! ## Features
//!
//! - **Area Constraints**: placed text and artwork never leave their printable area
//! - **Membership Resolution**: objects are tagged with the area that contains them
//! - **Customization Documents**: area-relative output for pricing and fulfillment
//! - **Pricing**: base price plus decoration and per-customization surcharges

pub mod script;

pub use garmentkit_core::{
    AssetError, Bounds, DesignerError, DesignerEvent, Error, Point, ProductRecord, Result,
    SceneEvent,
};
pub use garmentkit_designer as designer;
pub use garmentkit_designer::{
    Area, AreaKind, CustomizationDocument, DesignSession, GarmentView, ImageArtworkLoader,
};
pub use garmentkit_settings::{Config, SettingsError};
pub use script::{run_script, SessionCommand, SessionSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable selecting the log output format (`json` or text).
pub const LOG_FORMAT_ENV: &str = "RUST_LOG_FORMAT";

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout only carries results
/// - RUST_LOG environment variable support (default `info`)
/// - JSON lines when `RUST_LOG_FORMAT=json`
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}
