//! Per-pixel color filters: sepia tone and vignette.

use crate::ImageData;

/// Apply a sepia tone.
///
/// `intensity` blends between the original (0.0) and full sepia (1.0).
///
/// Sepia matrix:
/// ```text
/// R' = 0.393 R + 0.769 G + 0.189 B
/// G' = 0.349 R + 0.686 G + 0.168 B
/// B' = 0.272 R + 0.534 G + 0.131 B
/// ```
pub fn sepia_tone(image: &ImageData, intensity: f32) -> ImageData {
    let t = intensity.clamp(0.0, 1.0);
    let mut out = image.clone();
    if t == 0.0 {
        return out;
    }

    for chunk in out.pixels.chunks_exact_mut(3) {
        let r = chunk[0] as f32;
        let g = chunk[1] as f32;
        let b = chunk[2] as f32;

        let sr = (0.393 * r + 0.769 * g + 0.189 * b).min(255.0);
        let sg = (0.349 * r + 0.686 * g + 0.168 * b).min(255.0);
        let sb = (0.272 * r + 0.534 * g + 0.131 * b).min(255.0);

        chunk[0] = mix(r, sr, t);
        chunk[1] = mix(g, sg, t);
        chunk[2] = mix(b, sb, t);
    }
    out
}

/// Darken the image towards its edges.
///
/// `radius` is the distance in pixels from the center at which the darkening
/// reaches `intensity`; inside that the falloff follows a smootherstep curve.
/// Negative intensities brighten instead.
pub fn vignette(image: &ImageData, intensity: f32, radius: f32) -> ImageData {
    let mut out = image.clone();
    if intensity == 0.0 || image.is_empty() {
        return out;
    }

    let cx = image.width as f32 / 2.0;
    let cy = image.height as f32 / 2.0;
    let reach = radius.max(1.0);
    let width = image.width as usize;

    for (i, chunk) in out.pixels.chunks_exact_mut(3).enumerate() {
        let x = (i % width) as f32 + 0.5;
        let y = (i / width) as f32 + 0.5;
        let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
        let factor = (1.0 - intensity * smootherstep(dist / reach)).max(0.0);

        for c in chunk.iter_mut() {
            *c = (*c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> u8 {
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

/// `6t^5 - 15t^4 + 10t^3`, with `t` clamped to 0-1.
#[inline]
fn smootherstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sepia_zero_intensity_is_identity() {
        let img = ImageData::new(2, 1, vec![10, 200, 30, 90, 90, 250]);
        assert_eq!(sepia_tone(&img, 0.0), img);
    }

    #[test]
    fn test_sepia_full_gray() {
        let img = ImageData::filled(1, 1, [100, 100, 100]);
        let out = sepia_tone(&img, 1.0);
        // 100 * (0.393 + 0.769 + 0.189) = 135.1
        assert_eq!(out.pixel(0, 0), [135, 120, 94]);
    }

    #[test]
    fn test_sepia_clips_white() {
        let img = ImageData::filled(1, 1, [255, 255, 255]);
        let out = sepia_tone(&img, 1.0);
        assert_eq!(out.pixel(0, 0)[0], 255);
        assert_eq!(out.pixel(0, 0)[1], 255);
        assert!(out.pixel(0, 0)[2] < 255);
    }

    #[test]
    fn test_sepia_half_intensity_between() {
        let img = ImageData::filled(1, 1, [100, 100, 100]);
        let r = sepia_tone(&img, 0.5).pixel(0, 0)[0];
        assert!(r > 100 && r < 135);
    }

    #[test]
    fn test_vignette_zero_intensity_is_identity() {
        let img = ImageData::filled(8, 8, [200, 200, 200]);
        assert_eq!(vignette(&img, 0.0, 4.0), img);
    }

    #[test]
    fn test_vignette_darkens_corners_not_center() {
        let img = ImageData::filled(41, 41, [200, 200, 200]);
        let out = vignette(&img, 1.0, 20.0);
        let center = out.pixel(20, 20)[0];
        let corner = out.pixel(0, 0)[0];
        assert!(center >= 199, "center should be untouched, got {center}");
        assert_eq!(corner, 0, "corner beyond the radius gets full intensity");
    }

    #[test]
    fn test_vignette_partial_intensity() {
        let img = ImageData::filled(41, 41, [200, 200, 200]);
        let out = vignette(&img, 0.5, 10.0);
        assert_eq!(out.pixel(0, 0)[0], 100);
    }

    #[test]
    fn test_smootherstep_boundaries() {
        assert_eq!(smootherstep(0.0), 0.0);
        assert_eq!(smootherstep(1.0), 1.0);
        assert!((smootherstep(0.5) - 0.5).abs() < f32::EPSILON);
        assert_eq!(smootherstep(3.0), 1.0);
    }
}
