//! Filter session bindings.
//!
//! The UI owns one `JsFilterSession` per screen. Slider and picker events map
//! one-to-one onto its setters; after each call the UI reads `derived()` and
//! the `show_*` flags to redraw.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsFilterSession();
//! session.load_source_bytes(new Uint8Array(await file.arrayBuffer()));
//! session.select_filter_by_name("Vignette");
//! session.set_intensity(0.8);
//!
//! const out = session.derived();
//! if (out) draw(out.rgba_pixels(), out.width, out.height);
//!
//! session.save(persistToGallery, () => alert("Saved"), (msg) => alert(msg));
//! ```

use instafilter_core::{decode_image, FilterKind, FilterSession, SessionConfig};
use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::sink::{js_callbacks, JsSink};
use crate::types::JsImage;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Filter session wrapper for JavaScript.
#[wasm_bindgen]
pub struct JsFilterSession {
    inner: FilterSession,
}

#[wasm_bindgen]
impl JsFilterSession {
    /// Create a session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: FilterSession::new(SessionConfig::default()),
        }
    }

    /// Create a session from a configuration object.
    ///
    /// Missing fields take their defaults, e.g.
    /// `{ radius_mapping: "from_intensity", switch_policy: "reset" }`.
    pub fn with_config(config: JsValue) -> Result<JsFilterSession, JsValue> {
        let config: SessionConfig = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        Ok(Self {
            inner: FilterSession::new(config),
        })
    }

    /// Select a filter by its position in `filter_names()`.
    pub fn select_filter(&mut self, index: u8) -> Result<(), JsValue> {
        let kind = FilterKind::from_index(index)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown filter index: {index}")))?;
        self.inner.select_filter(kind);
        Ok(())
    }

    /// Select a filter by name, e.g. "Gaussian Blur".
    pub fn select_filter_by_name(&mut self, name: &str) -> Result<(), JsValue> {
        let kind: FilterKind = name.parse().map_err(to_js_error)?;
        self.inner.select_filter(kind);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn filter_index(&self) -> u8 {
        self.inner.spec().kind().index()
    }

    #[wasm_bindgen(getter)]
    pub fn filter_name(&self) -> String {
        self.inner.spec().kind().display_name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn intensity(&self) -> f32 {
        self.inner.intensity()
    }

    pub fn set_intensity(&mut self, value: f32) {
        self.inner.set_intensity(value);
    }

    #[wasm_bindgen(getter)]
    pub fn radius(&self) -> f32 {
        self.inner.radius()
    }

    pub fn set_radius(&mut self, value: f32) {
        self.inner.set_radius(value);
    }

    /// Whether the intensity slider applies to the current filter.
    #[wasm_bindgen(getter)]
    pub fn show_intensity(&self) -> bool {
        self.inner.sliders().intensity
    }

    /// Whether the radius slider applies to the current filter.
    #[wasm_bindgen(getter)]
    pub fn show_radius(&self) -> bool {
        self.inner.sliders().radius
    }

    /// Use an already decoded image as the source.
    pub fn load_source(&mut self, image: &JsImage) -> Result<(), JsValue> {
        let image = image
            .to_image()
            .ok_or_else(|| JsValue::from_str("Pixel buffer does not match image dimensions"))?;
        self.inner.load_source(Some(image));
        Ok(())
    }

    /// Decode a picked file (JPEG or PNG) and use it as the source.
    pub fn load_source_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let image = decode_image(bytes).map_err(to_js_error)?;
        self.inner.load_source(Some(image));
        Ok(())
    }

    pub fn clear_source(&mut self) {
        self.inner.load_source(None);
    }

    #[wasm_bindgen(getter)]
    pub fn has_source(&self) -> bool {
        self.inner.source().is_some()
    }

    /// The filtered image, or `undefined` when there is nothing to show.
    pub fn derived(&self) -> Option<JsImage> {
        self.inner.derived().cloned().map(JsImage::from_image)
    }

    /// Save the filtered image through `persist`.
    ///
    /// Returns `false` without calling anything when there is no image.
    pub fn save(&self, persist: &Function, on_success: Function, on_error: Function) -> bool {
        let mut sink = JsSink::new(persist, self.inner.config().export);
        let outcome = self
            .inner
            .save(&mut sink, js_callbacks(on_success, on_error));
        outcome == instafilter_core::SaveOutcome::Submitted
    }
}

impl Default for JsFilterSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instafilter_core::ImageData;

    fn photo() -> JsImage {
        let img = ImageData::filled(8, 6, [120, 90, 60]);
        JsImage::new(img.width, img.height, img.pixels)
    }

    #[test]
    fn test_defaults() {
        let session = JsFilterSession::new();
        assert_eq!(session.filter_name(), "Sepia Tone");
        assert_eq!(session.intensity(), 0.5);
        assert!(session.show_intensity());
        assert!(!session.show_radius());
        assert!(!session.has_source());
        assert!(session.derived().is_none());
    }

    #[test]
    fn test_select_by_index_updates_sliders() {
        let mut session = JsFilterSession::new();
        assert!(session.select_filter(FilterKind::GaussianBlur.index()).is_ok());
        assert_eq!(session.filter_name(), "Gaussian Blur");
        assert!(!session.show_intensity());
        assert!(session.show_radius());
    }

    #[test]
    fn test_select_by_name() {
        let mut session = JsFilterSession::new();
        assert!(session.select_filter_by_name("unsharp mask").is_ok());
        assert_eq!(session.filter_index(), FilterKind::UnsharpMask.index());
        assert!(session.show_intensity() && session.show_radius());
    }

    #[test]
    fn test_load_and_clear() {
        let mut session = JsFilterSession::new();
        assert!(session.load_source(&photo()).is_ok());
        assert!(session.has_source());
        let derived = session.derived().unwrap();
        assert_eq!((derived.width(), derived.height()), (8, 6));

        session.clear_source();
        assert!(!session.has_source());
        assert!(session.derived().is_none());
    }

    #[test]
    fn test_load_bytes() {
        let png = instafilter_core::encode_png(&ImageData::filled(5, 5, [1, 2, 3])).unwrap();
        let mut session = JsFilterSession::new();
        assert!(session.load_source_bytes(&png).is_ok());
        assert!(session.has_source());
    }

    #[test]
    fn test_setters_clamp() {
        let mut session = JsFilterSession::new();
        session.set_intensity(4.0);
        session.set_radius(-3.0);
        assert_eq!(session.intensity(), 1.0);
        assert_eq!(session.radius(), 0.0);
    }
}

/// Tests that create `JsValue`s only run on wasm32. Use `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_unknown_filter_index() {
        let mut session = JsFilterSession::new();
        assert!(session.select_filter(7).is_err());
        assert!(session.select_filter_by_name("posterize").is_err());
    }

    #[wasm_bindgen_test]
    fn test_with_config() {
        let config = js_sys::JSON::parse(r#"{"radius_mapping":"from_intensity","switch_policy":"reset"}"#).unwrap();
        let mut session = JsFilterSession::with_config(config).unwrap();
        session.select_filter(FilterKind::GaussianBlur.index()).unwrap();
        assert!(session.show_intensity());
        assert!(!session.show_radius());
    }

    #[wasm_bindgen_test]
    fn test_save_without_image_skips_persist() {
        let session = JsFilterSession::new();
        let persist = Function::new_with_args("bytes, mime, ok, err", "throw new Error('should not be called');");
        let noop = Function::new_no_args("");
        assert!(!session.save(&persist, noop.clone(), noop));
    }

    #[wasm_bindgen_test]
    fn test_save_with_image() {
        let mut session = JsFilterSession::new();
        session.load_source(&JsImage::new(2, 2, vec![100; 12])).unwrap();
        let persist = Function::new_with_args("bytes, mime, ok, err", "ok();");
        let noop = Function::new_no_args("");
        assert!(session.save(&persist, noop.clone(), noop));
    }

    #[wasm_bindgen_test]
    fn test_load_garbage_bytes() {
        let mut session = JsFilterSession::new();
        assert!(session.load_source_bytes(&[1, 2, 3]).is_err());
        assert!(!session.has_source());
    }
}
