//! GarmentKit Settings Crate
//!
//! Handles designer configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{
    ArtworkSettings, Config, DesignerSettings, MembershipPolicy, PricingSettings, ScaleClampMode,
    TextSettings,
};
pub use error::{SettingsError, SettingsResult};
