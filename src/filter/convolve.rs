//! 3x3 neighborhood convolution with clamp-to-border sampling.

use crate::bmp::Bitmap;
use crate::grid::PixelGrid;
use crate::pixel::{BGR8, clamp_channel};

/// A 3x3 integer kernel, rows top to bottom.
pub type Kernel3 = [[i32; 3]; 3];

impl Bitmap {
    /// Convolve every pixel with `kernel`, each channel independently,
    /// clamping sums into 0..=255.
    ///
    /// Out-of-range neighbor coordinates are replaced by the nearest edge
    /// pixel on both axes. All outputs go to a fresh grid which replaces the
    /// old one only once the pass is complete; reading neighbors from a grid
    /// being mutated would corrupt later samples.
    pub fn apply_kernel(&mut self, kernel: &Kernel3) {
        let height = self.grid.height();
        let width = self.grid.width();
        if height == 0 || width == 0 {
            return;
        }
        let mut out = PixelGrid::new(height, width);
        for y in 0..height {
            for x in 0..width {
                out.rows[y].colours[x] = convolve_at(&self.grid, kernel, y, x);
            }
        }
        self.replace_grid(out);
    }
}

fn convolve_at(grid: &PixelGrid, kernel: &Kernel3, y: usize, x: usize) -> BGR8 {
    let max_y = (grid.height() - 1) as i64;
    let max_x = (grid.width() - 1) as i64;
    let mut sums = [0i32; 3];
    for (ky, kernel_row) in kernel.iter().enumerate() {
        for (kx, &weight) in kernel_row.iter().enumerate() {
            // offsets are in {-1, 0, 1}; clamp in the signed domain before
            // converting back to an index
            let sample_y = (y as i64 + ky as i64 - 1).clamp(0, max_y) as usize;
            let sample_x = (x as i64 + kx as i64 - 1).clamp(0, max_x) as usize;
            let px = grid.rows[sample_y].colours[sample_x];
            sums[0] += weight * i32::from(px.b);
            sums[1] += weight * i32::from(px.g);
            sums[2] += weight * i32::from(px.r);
        }
    }
    BGR8 {
        b: clamp_channel(sums[0]),
        g: clamp_channel(sums[1]),
        r: clamp_channel(sums[2]),
    }
}
