//! Blur-based filters: gaussian blur and unsharp mask.

use image::{imageops, RgbImage};

use crate::ImageData;

fn blurred(image: &ImageData, sigma: f32) -> Option<RgbImage> {
    let rgb = image.to_rgb_image()?;
    Some(imageops::blur(&rgb, sigma))
}

/// Gaussian blur with standard deviation `radius` (in pixels).
///
/// A radius of zero or less returns the image unchanged.
pub fn gaussian_blur(image: &ImageData, radius: f32) -> ImageData {
    if radius <= 0.0 || image.is_empty() {
        return image.clone();
    }
    match blurred(image, radius) {
        Some(rgb) => ImageData::from_rgb_image(rgb),
        None => image.clone(),
    }
}

/// Sharpen by adding back the difference to a blurred copy.
///
/// `result = source + intensity * (source - blur(source, radius))`
pub fn unsharp_mask(image: &ImageData, intensity: f32, radius: f32) -> ImageData {
    if radius <= 0.0 || intensity == 0.0 || image.is_empty() {
        return image.clone();
    }
    let Some(blur) = blurred(image, radius) else {
        return image.clone();
    };

    let pixels = image
        .pixels
        .iter()
        .zip(blur.as_raw())
        .map(|(&s, &b)| {
            let s = s as f32;
            let v = s + intensity * (s - b as f32);
            v.round().clamp(0.0, 255.0) as u8
        })
        .collect();

    ImageData::new(image.width, image.height, pixels)
}
