//! Stylizing filters: crystallize, edges and pixellate.

use crate::ImageData;

/// Jitter seed for crystallize cells. Fixed so the output only depends on
/// the inputs.
const CRYSTAL_SEED: u32 = 0x1F2E_3D4C;

/// Integer hash (murmur3 finalizer).
#[inline]
fn hash_u32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^= h >> 16;
    h
}

/// Hash a grid cell to a value in `[0, 1)`.
#[inline]
fn hash_unit(x: u32, y: u32, seed: u32) -> f32 {
    let h = hash_u32(
        x.wrapping_mul(374_761_393)
            .wrapping_add(y.wrapping_mul(668_265_263))
            .wrapping_add(seed),
    );
    (h & 0x00FF_FFFF) as f32 / 16_777_216.0
}

/// Jittered seed points, one per `cell`-sized grid square.
struct SeedGrid {
    cells_x: i32,
    cells_y: i32,
    cell: f32,
    seeds: Vec<(f32, f32)>,
}

impl SeedGrid {
    fn new(cells_x: i32, cells_y: i32, cell: f32) -> Self {
        let mut seeds = Vec::with_capacity((cells_x * cells_y) as usize);
        for cy in 0..cells_y {
            for cx in 0..cells_x {
                let jx = hash_unit(cx as u32, cy as u32, CRYSTAL_SEED);
                let jy = hash_unit(cx as u32, cy as u32, CRYSTAL_SEED.wrapping_add(77));
                seeds.push(((cx as f32 + jx) * cell, (cy as f32 + jy) * cell));
            }
        }
        Self {
            cells_x,
            cells_y,
            cell,
            seeds,
        }
    }

    /// Index of the seed closest to the center of pixel `(x, y)`.
    fn nearest(&self, x: u32, y: u32) -> usize {
        let gcx = (x as f32 / self.cell) as i32;
        let gcy = (y as f32 / self.cell) as i32;
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        let mut best = (f32::MAX, 0usize);
        // Jitter spans a whole cell, so the nearest seed can sit two cells away
        for ny in (gcy - 2).max(0)..=(gcy + 2).min(self.cells_y - 1) {
            for nx in (gcx - 2).max(0)..=(gcx + 2).min(self.cells_x - 1) {
                let idx = (ny * self.cells_x + nx) as usize;
                let (sx, sy) = self.seeds[idx];
                let d = (px - sx).powi(2) + (py - sy).powi(2);
                if d < best.0 {
                    best = (d, idx);
                }
            }
        }
        best.1
    }
}

/// Voronoi "crystal" effect.
///
/// One seed point is placed per `radius`-sized grid cell, jittered inside the
/// cell, and every pixel takes the average color of its nearest seed's region.
/// Radii below 1 return the image unchanged.
pub fn crystallize(image: &ImageData, radius: f32) -> ImageData {
    if radius < 1.0 || image.is_empty() {
        return image.clone();
    }
    let cs = radius;
    let w = image.width;
    let h = image.height;
    let cells_x = ((w as f32 / cs).ceil() as i32).max(1);
    let cells_y = ((h as f32 / cs).ceil() as i32).max(1);

    let grid = SeedGrid::new(cells_x, cells_y, cs);
    let seeds = &grid.seeds;

    let mut owner = Vec::with_capacity(image.pixel_count());
    let mut sums = vec![[0u64; 3]; seeds.len()];
    let mut counts = vec![0u64; seeds.len()];
    for y in 0..h {
        for x in 0..w {
            let idx = grid.nearest(x, y);
            let p = image.pixel(x, y);
            for c in 0..3 {
                sums[idx][c] += p[c] as u64;
            }
            counts[idx] += 1;
            owner.push(idx);
        }
    }

    let averages: Vec<[u8; 3]> = sums
        .iter()
        .zip(&counts)
        .map(|(sum, &n)| match n {
            0 => [0; 3],
            n => sum.map(|s| ((s + n / 2) / n) as u8),
        })
        .collect();

    let pixels = owner.iter().flat_map(|&idx| averages[idx]).collect();
    ImageData::new(w, h, pixels)
}

/// Sobel edge detection, applied per channel.
///
/// The gradient magnitude is multiplied by `intensity`. Samples outside the
/// image are clamped to the nearest edge pixel, so flat regions go black.
pub fn edges(image: &ImageData, intensity: f32) -> ImageData {
    if image.is_empty() {
        return image.clone();
    }
    const SOBEL_X: [i32; 9] = [-1, 0, 1, -2, 0, 2, -1, 0, 1];
    const SOBEL_Y: [i32; 9] = [-1, -2, -1, 0, 0, 0, 1, 2, 1];

    let w = image.width as i32;
    let h = image.height as i32;
    let mut pixels = Vec::with_capacity(image.byte_size());

    for y in 0..h {
        for x in 0..w {
            let mut gx = [0i32; 3];
            let mut gy = [0i32; 3];
            for ky in -1..=1 {
                for kx in -1..=1 {
                    let sx = (x + kx).clamp(0, w - 1) as u32;
                    let sy = (y + ky).clamp(0, h - 1) as u32;
                    let p = image.pixel(sx, sy);
                    let ki = ((ky + 1) * 3 + (kx + 1)) as usize;
                    for c in 0..3 {
                        gx[c] += p[c] as i32 * SOBEL_X[ki];
                        gy[c] += p[c] as i32 * SOBEL_Y[ki];
                    }
                }
            }
            for c in 0..3 {
                let magnitude = ((gx[c] * gx[c] + gy[c] * gy[c]) as f32).sqrt();
                pixels.push((magnitude * intensity).round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    ImageData::new(image.width, image.height, pixels)
}

/// Replace each `scale`-sized block with the color at its center.
///
/// Scales below 2 return the image unchanged.
pub fn pixellate(image: &ImageData, scale: f32) -> ImageData {
    let bs = scale.round();
    if bs < 2.0 || image.is_empty() {
        return image.clone();
    }
    let bs = bs as u32;
    let w = image.width;
    let h = image.height;

    let mut pixels = Vec::with_capacity(image.byte_size());
    for y in 0..h {
        let sy = ((y / bs) * bs + bs / 2).min(h - 1);
        for x in 0..w {
            let sx = ((x / bs) * bs + bs / 2).min(w - 1);
            pixels.extend_from_slice(&image.pixel(sx, sy));
        }
    }
    ImageData::new(w, h, pixels)
}
