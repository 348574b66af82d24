//! Session configuration.
//!
//! The screen has shipped with slightly different slider policies. Rather than
//! guessing, the session takes the policy explicitly:
//!
//! - [`RadiusMapping`] decides where the radius input comes from.
//! - [`SwitchPolicy`] decides what happens to slider values on filter change.
//!
//! All fields have defaults, so a partial JSON object deserializes fine.

use serde::{Deserialize, Serialize};

use crate::encode::ExportFormat;
use crate::filter::FilterKind;

/// Slider range of the intensity channel.
pub const INTENSITY_RANGE: (f32, f32) = (0.0, 1.0);
/// Slider range of the radius channel.
pub const RADIUS_RANGE: (f32, f32) = (0.0, 200.0);
/// Multiplier from intensity to the scale input.
pub const SCALE_FACTOR: f32 = 10.0;
/// Multiplier from intensity to the radius input under [`RadiusMapping::FromIntensity`].
pub const RADIUS_FROM_INTENSITY_FACTOR: f32 = 200.0;

/// Source of the radius input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusMapping {
    /// A dedicated radius slider (0-200), passed through unchanged.
    #[default]
    Direct,
    /// A single intensity slider drives everything; radius = intensity x 200.
    /// The radius slider is never shown.
    FromIntensity,
}

/// What happens to intensity and radius when another filter is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchPolicy {
    /// Values carry over between filters.
    #[default]
    Retain,
    /// Values return to the configured defaults.
    Reset,
}

/// Encoding used when saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub format: ExportFormat,
    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jpeg,
            quality: 90,
        }
    }
}

/// Configuration for a [`crate::FilterSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Filter active before the user picks one.
    pub initial_filter: FilterKind,
    /// Starting intensity, also the value restored by [`SwitchPolicy::Reset`].
    pub default_intensity: f32,
    /// Starting radius, also the value restored by [`SwitchPolicy::Reset`].
    pub default_radius: f32,
    pub radius_mapping: RadiusMapping,
    pub switch_policy: SwitchPolicy,
    pub export: ExportSettings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_filter: FilterKind::SepiaTone,
            default_intensity: 0.5,
            default_radius: 100.0,
            radius_mapping: RadiusMapping::Direct,
            switch_policy: SwitchPolicy::Retain,
            export: ExportSettings::default(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-slider layout: radius follows intensity x 200.
    pub fn single_slider() -> Self {
        Self {
            radius_mapping: RadiusMapping::FromIntensity,
            ..Self::default()
        }
    }
}

/// Clamp a value to a slider range.
pub(crate) fn clamp_to(range: (f32, f32), value: f32) -> f32 {
    if value.is_nan() {
        return range.0;
    }
    value.clamp(range.0, range.1)
}
