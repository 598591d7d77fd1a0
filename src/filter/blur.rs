//! Two-pass separable Gaussian blur with an edge-truncated, renormalized
//! window.
//!
//! For parameter `sigma`, the weight of a sample at distance `d` along the
//! pass axis is `c1 * c2^(d^2)` with `c1 = 1/sqrt(2*pi*sigma)` and
//! `c2 = exp(-1/(2*sigma^2))`. The window spans `[-3*sigma, 3*sigma]`,
//! truncated at the image edge; each pixel is divided by the sum of the
//! weights actually used, so truncation near a border does not darken it.

use std::num::NonZeroU32;

use crate::bmp::Bitmap;
use crate::grid::PixelGrid;
use crate::pixel::{BGR8, round_channel};

enum Axis {
    Vertical,
    Horizontal,
}

impl Bitmap {
    /// Gaussian-blur the image in place: a vertical pass, then a horizontal
    /// pass over the vertical pass's output. Each pass populates a fresh
    /// grid and swaps it in whole.
    pub fn gaussian_blur(&mut self, sigma: NonZeroU32) {
        if self.grid.height() == 0 || self.grid.width() == 0 {
            return;
        }
        let max_extent = self.grid.height().max(self.grid.width());
        let weights = sample_weights(sigma.get(), max_extent);
        let vertical = blur_pass(&self.grid, &weights, Axis::Vertical);
        self.replace_grid(vertical);
        let horizontal = blur_pass(&self.grid, &weights, Axis::Horizontal);
        self.replace_grid(horizontal);
    }
}

/// Weight table indexed by sample distance, for distances `0..=3*sigma`.
///
/// No window can reach further than `max_extent - 1` pixels from its center,
/// so the table is capped there; a huge sigma on a small image must not
/// drive a huge allocation.
fn sample_weights(sigma: u32, max_extent: usize) -> Vec<f64> {
    let radius = (3 * i64::from(sigma)).min(max_extent as i64 - 1);
    let sigma = f64::from(sigma);
    let c1 = 1.0 / (2.0 * std::f64::consts::PI * sigma).sqrt();
    let c2 = (-1.0 / (2.0 * sigma * sigma)).exp();
    (0..=radius).map(|d| c1 * c2.powf((d * d) as f64)).collect()
}

fn blur_pass(grid: &PixelGrid, weights: &[f64], axis: Axis) -> PixelGrid {
    let height = grid.height();
    let width = grid.width();
    let radius = (weights.len() - 1) as i64;
    let mut out = PixelGrid::new(height, width);
    for y in 0..height {
        for x in 0..width {
            // window bounds in the signed domain, clamped before indexing
            let (center, limit) = match axis {
                Axis::Vertical => (y as i64, height as i64 - 1),
                Axis::Horizontal => (x as i64, width as i64 - 1),
            };
            let lo = (center - radius).max(0);
            let hi = (center + radius).min(limit);

            let mut sums = [0.0f64; 3];
            let mut norm = 0.0f64;
            for i in lo..=hi {
                let weight = weights[(i - center).unsigned_abs() as usize];
                let px = match axis {
                    Axis::Vertical => grid.rows[i as usize].colours[x],
                    Axis::Horizontal => grid.rows[y].colours[i as usize],
                };
                norm += weight;
                sums[0] += weight * f64::from(px.b);
                sums[1] += weight * f64::from(px.g);
                sums[2] += weight * f64::from(px.r);
            }
            out.rows[y].colours[x] = BGR8 {
                b: round_channel(sums[0] / norm),
                g: round_channel(sums[1] / norm),
                r: round_channel(sums[2] / norm),
            };
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::testutil::bitmap_from_rows;
    use crate::pixel::splat;

    fn sigma(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn uniform_image_is_invariant() {
        let colour = BGR8 {
            b: 37,
            g: 140,
            r: 251,
        };
        for (w, h) in [(1, 1), (2, 3), (5, 5), (8, 2)] {
            let mut image = bitmap_from_rows(vec![vec![colour; w]; h]);
            image.gaussian_blur(sigma(1));
            for row in &image.grid.rows {
                assert!(row.colours.iter().all(|px| *px == colour));
            }
        }
    }

    #[test]
    fn weights_decay_with_distance() {
        let weights = sample_weights(2, 100);
        assert_eq!(weights.len(), 7);
        for pair in weights.windows(2) {
            assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn weight_table_is_capped_by_image_extent() {
        // the window can never reach further than the image itself, so a
        // huge sigma must not allocate a huge table
        assert_eq!(sample_weights(20_000_000, 2).len(), 2);
        assert_eq!(sample_weights(u32::MAX, 1).len(), 1);
        // small sigma on a large image keeps the full 3-sigma radius
        assert_eq!(sample_weights(1, 100).len(), 4);
    }

    #[test]
    fn huge_sigma_on_tiny_image_is_cheap() {
        let colour = BGR8 {
            b: 12,
            g: 34,
            r: 56,
        };
        let mut image = bitmap_from_rows(vec![vec![colour]]);
        image.gaussian_blur(sigma(20_000_000));
        assert_eq!(image.grid.rows[0].colours[0], colour);
    }

    #[test]
    fn blur_spreads_a_point() {
        // a white dot on black must leak into its neighbors
        let mut image = bitmap_from_rows(vec![
            vec![splat(0), splat(0), splat(0)],
            vec![splat(0), splat(255), splat(0)],
            vec![splat(0), splat(0), splat(0)],
        ]);
        image.gaussian_blur(sigma(1));
        assert!(image.grid.rows[1].colours[1].b < 255);
        assert!(image.grid.rows[0].colours[1].b > 0);
        assert!(image.grid.rows[1].colours[0].b > 0);
    }

    #[test]
    fn large_sigma_near_border_does_not_wrap() {
        // 3*sigma far exceeds the image size; bounds must clamp, not wrap
        let mut image = bitmap_from_rows(vec![vec![splat(10), splat(200)]]);
        image.gaussian_blur(sigma(50));
        let row = &image.grid.rows[0].colours;
        assert!(row[0].b >= 10 && row[0].b <= 200);
        assert!(row[1].b >= 10 && row[1].b <= 200);
    }
}
