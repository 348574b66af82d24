//! Encoding derived images for saving.
//!
//! JPEG is the default export format; PNG is offered for lossless saves.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ImageData;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output format for saved images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Jpeg,
    Png,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Png => "image/png",
        }
    }
}

fn validate(image: &ImageData) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }
    let expected = image.width as usize * image.height as usize * 3;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}

/// Encode an image to JPEG bytes.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(image: &ImageData, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode an image to PNG bytes.
pub fn encode_png(image: &ImageData) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode in the given format. `quality` only applies to JPEG.
pub fn encode(image: &ImageData, format: ExportFormat, quality: u8) -> Result<Vec<u8>, EncodeError> {
    match format {
        ExportFormat::Jpeg => encode_jpeg(image, quality),
        ExportFormat::Png => encode_png(image),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any valid buffer encodes to a well-formed JPEG.
        #[test]
        fn prop_valid_input_produces_jpeg(
            (width, height) in (1u32..=24, 1u32..=24),
            quality in 0u8..=255,
            seed in any::<u8>(),
        ) {
            let pixels = (0..(width * height * 3) as usize)
                .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
                .collect();
            let jpeg = encode_jpeg(&ImageData::new(width, height, pixels), quality).unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Mismatched buffers are rejected for both formats.
        #[test]
        fn prop_bad_length_rejected(
            (width, height) in (1u32..=16, 1u32..=16),
            delta in 1usize..=9,
        ) {
            let img = ImageData {
                width,
                height,
                pixels: vec![0; (width * height * 3) as usize + delta],
            };
            let jpeg_rejected = matches!(encode_jpeg(&img, 90), Err(EncodeError::InvalidPixelData { .. }));
            let png_rejected = matches!(encode_png(&img), Err(EncodeError::InvalidPixelData { .. }));
            prop_assert!(jpeg_rejected);
            prop_assert!(png_rejected);
        }
    }
}
