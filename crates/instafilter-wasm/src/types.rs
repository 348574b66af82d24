//! WASM-compatible wrapper types for image data.

use instafilter_core::ImageData;
use wasm_bindgen::prelude::*;

/// An RGB image for JavaScript.
///
/// Pixels live in WASM memory; `pixels()` copies them out as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from dimensions and RGB pixel data (3 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data with opaque alpha, ready for `ImageData` on a
    /// canvas.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect()
    }
}

impl JsImage {
    pub(crate) fn from_image(img: ImageData) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert to a core image. Returns `None` if the buffer does not match
    /// the dimensions.
    pub(crate) fn to_image(&self) -> Option<ImageData> {
        let expected = self.width as usize * self.height as usize * 3;
        (self.pixels.len() == expected).then(|| ImageData::new(self.width, self.height, self.pixels.clone()))
    }
}
