//! Filter catalogue and the raster filter engine.
//!
//! ## Filters
//!
//! | kind          | intensity | radius | scale |
//! |---------------|-----------|--------|-------|
//! | Crystallize   |           | x      |       |
//! | Edges         | x         |        |       |
//! | Gaussian Blur |           | x      |       |
//! | Pixellate     |           |        | x     |
//! | Sepia Tone    | x         |        |       |
//! | Unsharp Mask  | x         | x      |       |
//! | Vignette      | x         | x      |       |
//!
//! The table is static: which inputs a filter accepts is a property of its
//! kind, never looked up at runtime.

mod blur;
mod color;
pub mod engine;
mod stylize;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use blur::{gaussian_blur, unsharp_mask};
pub use color::{sepia_tone, vignette};
pub use engine::{FilterEngine, RasterEngine};
pub use stylize::{crystallize, edges, pixellate};

/// One of the seven supported image filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Crystallize,
    Edges,
    GaussianBlur,
    Pixellate,
    #[default]
    SepiaTone,
    UnsharpMask,
    Vignette,
}

/// A scalar input channel of the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKey {
    Intensity,
    Radius,
    Scale,
}

impl FilterKind {
    /// All kinds, in the order they are offered to the user.
    pub const ALL: [FilterKind; 7] = [
        FilterKind::Crystallize,
        FilterKind::Edges,
        FilterKind::GaussianBlur,
        FilterKind::Pixellate,
        FilterKind::SepiaTone,
        FilterKind::UnsharpMask,
        FilterKind::Vignette,
    ];

    /// Human-readable name shown in the filter picker.
    pub fn display_name(self) -> &'static str {
        match self {
            FilterKind::Crystallize => "Crystallize",
            FilterKind::Edges => "Edges",
            FilterKind::GaussianBlur => "Gaussian Blur",
            FilterKind::Pixellate => "Pixellate",
            FilterKind::SepiaTone => "Sepia Tone",
            FilterKind::UnsharpMask => "Unsharp Mask",
            FilterKind::Vignette => "Vignette",
        }
    }

    /// The inputs this kind accepts.
    pub fn parameters(self) -> &'static [ParameterKey] {
        use ParameterKey::*;
        match self {
            FilterKind::Crystallize => &[Radius],
            FilterKind::Edges => &[Intensity],
            FilterKind::GaussianBlur => &[Radius],
            FilterKind::Pixellate => &[Scale],
            FilterKind::SepiaTone => &[Intensity],
            FilterKind::UnsharpMask => &[Intensity, Radius],
            FilterKind::Vignette => &[Intensity, Radius],
        }
    }

    /// Position in [`FilterKind::ALL`].
    pub fn index(self) -> u8 {
        Self::ALL
            .iter()
            .position(|k| *k == self)
            .map_or(0, |i| i as u8)
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when a filter name does not match any kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown filter: {0}")]
pub struct ParseFilterError(pub String);

impl FromStr for FilterKind {
    type Err = ParseFilterError;

    /// Accepts display names and identifiers alike: "Gaussian Blur",
    /// "gaussian_blur" and "gaussianBlur" all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        FilterKind::ALL
            .into_iter()
            .find(|kind| {
                kind.display_name()
                    .chars()
                    .filter(|c| *c != ' ')
                    .map(|c| c.to_ascii_lowercase())
                    .eq(folded.chars())
            })
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}

/// A selected filter together with the parameters it declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    kind: FilterKind,
}

impl FilterSpec {
    pub fn new(kind: FilterKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn parameters(&self) -> &'static [ParameterKey] {
        self.kind.parameters()
    }

    /// Check whether the filter accepts the given input.
    pub fn declares(&self, key: ParameterKey) -> bool {
        self.parameters().contains(&key)
    }
}

impl From<FilterKind> for FilterSpec {
    fn from(kind: FilterKind) -> Self {
        Self::new(kind)
    }
}

/// Scalar inputs handed to the filter engine, keyed by channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterInputs {
    values: BTreeMap<ParameterKey, f32>,
}

impl FilterInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: ParameterKey, value: f32) {
        self.values.insert(key, value);
    }

    pub fn with(mut self, key: ParameterKey, value: f32) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: ParameterKey) -> Option<f32> {
        self.values.get(&key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = ParameterKey> + '_ {
        self.values.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
