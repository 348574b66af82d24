//! The filter engine: renders a filter kind over a source image.

use super::{
    crystallize, edges, gaussian_blur, pixellate, sepia_tone, unsharp_mask, vignette,
    FilterInputs, FilterKind, ParameterKey,
};
use crate::ImageData;

/// Renders filters. The session only talks to the engine through this trait.
pub trait FilterEngine {
    /// Render `kind` over `source` with the given inputs.
    ///
    /// Returns `None` when there is nothing to render (no source, or an empty
    /// one). Inputs the filter does not accept are ignored; missing inputs
    /// fall back to the filter's defaults.
    fn render(
        &self,
        kind: FilterKind,
        source: Option<&ImageData>,
        inputs: &FilterInputs,
    ) -> Option<ImageData>;
}

/// Value used for an input the caller did not provide.
pub fn default_input(kind: FilterKind, key: ParameterKey) -> f32 {
    use FilterKind::*;
    use ParameterKey::*;
    match (kind, key) {
        (Edges, Intensity) | (SepiaTone, Intensity) => 1.0,
        (UnsharpMask, Intensity) => 0.5,
        (Vignette, Intensity) => 0.0,
        (Crystallize, Radius) => 20.0,
        (GaussianBlur, Radius) => 10.0,
        (UnsharpMask, Radius) => 2.5,
        (Vignette, Radius) => 1.0,
        (Pixellate, Scale) => 8.0,
        // Not an input of this kind
        _ => 0.0,
    }
}

/// CPU implementation backed by the functions in [`crate::filter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterEngine;

impl RasterEngine {
    pub fn new() -> Self {
        Self
    }
}

impl FilterEngine for RasterEngine {
    fn render(
        &self,
        kind: FilterKind,
        source: Option<&ImageData>,
        inputs: &FilterInputs,
    ) -> Option<ImageData> {
        let source = source.filter(|img| !img.is_empty() && img.is_consistent())?;
        let input = |key| inputs.get(key).unwrap_or_else(|| default_input(kind, key));

        let output = match kind {
            FilterKind::Crystallize => crystallize(source, input(ParameterKey::Radius)),
            FilterKind::Edges => edges(source, input(ParameterKey::Intensity)),
            FilterKind::GaussianBlur => gaussian_blur(source, input(ParameterKey::Radius)),
            FilterKind::Pixellate => pixellate(source, input(ParameterKey::Scale)),
            FilterKind::SepiaTone => sepia_tone(source, input(ParameterKey::Intensity)),
            FilterKind::UnsharpMask => unsharp_mask(
                source,
                input(ParameterKey::Intensity),
                input(ParameterKey::Radius),
            ),
            FilterKind::Vignette => vignette(
                source,
                input(ParameterKey::Intensity),
                input(ParameterKey::Radius),
            ),
        };
        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(size: u32) -> ImageData {
        let mut pixels = Vec::with_capacity((size * size * 3) as usize);
        for y in 0..size {
            for x in 0..size {
                let v = if (x / 2 + y / 2) % 2 == 0 { 40 } else { 210 };
                pixels.extend_from_slice(&[v, v / 2, 255 - v]);
            }
        }
        ImageData::new(size, size, pixels)
    }

    #[test]
    fn test_no_source_renders_nothing() {
        let engine = RasterEngine::new();
        for kind in FilterKind::ALL {
            assert!(engine.render(kind, None, &FilterInputs::new()).is_none());
        }
    }

    #[test]
    fn test_empty_source_renders_nothing() {
        let empty = ImageData::new(0, 0, vec![]);
        let out = RasterEngine.render(FilterKind::SepiaTone, Some(&empty), &FilterInputs::new());
        assert!(out.is_none());
    }

    #[test]
    fn test_mismatched_buffer_renders_nothing() {
        let short = ImageData {
            width: 8,
            height: 8,
            pixels: vec![10; 30],
        };
        for kind in FilterKind::ALL {
            assert!(
                RasterEngine.render(kind, Some(&short), &FilterInputs::new()).is_none(),
                "{kind}"
            );
        }
    }

    #[test]
    fn test_every_kind_keeps_dimensions() {
        let img = checker(16);
        for kind in FilterKind::ALL {
            let out = RasterEngine
                .render(kind, Some(&img), &FilterInputs::new())
                .unwrap();
            assert_eq!((out.width, out.height), (16, 16), "{kind}");
            assert_eq!(out.byte_size(), img.byte_size(), "{kind}");
        }
    }

    #[test]
    fn test_inputs_override_defaults() {
        let img = checker(16);
        let identity = FilterInputs::new().with(ParameterKey::Intensity, 0.0);
        let out = RasterEngine
            .render(FilterKind::SepiaTone, Some(&img), &identity)
            .unwrap();
        assert_eq!(out, img);

        // Default sepia intensity is 1.0, which changes the image
        let out = RasterEngine
            .render(FilterKind::SepiaTone, Some(&img), &FilterInputs::new())
            .unwrap();
        assert_ne!(out, img);
    }

    #[test]
    fn test_undeclared_inputs_ignored() {
        let img = checker(16);
        let plain = FilterInputs::new().with(ParameterKey::Scale, 4.0);
        let noisy = plain.clone().with(ParameterKey::Radius, 99.0);
        assert_eq!(
            RasterEngine.render(FilterKind::Pixellate, Some(&img), &plain),
            RasterEngine.render(FilterKind::Pixellate, Some(&img), &noisy)
        );
    }

    #[test]
    fn test_vignette_default_is_identity() {
        let img = checker(8);
        let out = RasterEngine
            .render(FilterKind::Vignette, Some(&img), &FilterInputs::new())
            .unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_default_inputs() {
        assert_eq!(default_input(FilterKind::Pixellate, ParameterKey::Scale), 8.0);
        assert_eq!(default_input(FilterKind::UnsharpMask, ParameterKey::Radius), 2.5);
        assert_eq!(default_input(FilterKind::SepiaTone, ParameterKey::Radius), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn kind_strategy() -> impl Strategy<Value = FilterKind> {
        (0u8..7).prop_map(|i| FilterKind::from_index(i).unwrap_or_default())
    }

    proptest! {
        /// Output always has the source's dimensions.
        #[test]
        fn prop_dimensions_preserved(
            kind in kind_strategy(),
            (w, h) in (1u32..=12, 1u32..=12),
            intensity in 0.0f32..=1.0,
            radius in 0.0f32..=20.0,
        ) {
            let img = ImageData::filled(w, h, [120, 60, 200]);
            let inputs = FilterInputs::new()
                .with(ParameterKey::Intensity, intensity)
                .with(ParameterKey::Radius, radius)
                .with(ParameterKey::Scale, intensity * 10.0);
            let out = RasterEngine.render(kind, Some(&img), &inputs).unwrap();
            prop_assert_eq!((out.width, out.height), (w, h));
            prop_assert_eq!(out.byte_size(), img.byte_size());
        }

        /// Rendering is a pure function of its inputs.
        #[test]
        fn prop_render_is_deterministic(
            kind in kind_strategy(),
            intensity in 0.0f32..=1.0,
            seed in any::<u8>(),
        ) {
            let pixels = (0..8 * 8 * 3).map(|i: u32| (i as u8).wrapping_mul(seed | 1)).collect();
            let img = ImageData::new(8, 8, pixels);
            let inputs = FilterInputs::new()
                .with(ParameterKey::Intensity, intensity)
                .with(ParameterKey::Radius, 3.0)
                .with(ParameterKey::Scale, 3.0);
            prop_assert_eq!(
                RasterEngine.render(kind, Some(&img), &inputs),
                RasterEngine.render(kind, Some(&img), &inputs)
            );
        }

        /// Sepia at zero intensity leaves any image untouched.
        #[test]
        fn prop_sepia_zero_identity(bytes in prop::collection::vec(any::<u8>(), 27)) {
            let img = ImageData::new(3, 3, bytes);
            let inputs = FilterInputs::new().with(ParameterKey::Intensity, 0.0);
            let out = RasterEngine.render(FilterKind::SepiaTone, Some(&img), &inputs);
            prop_assert_eq!(out, Some(img));
        }
    }
}
