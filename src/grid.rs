//! The in-memory pixel grid: rows of BGR pixels, padding-free.
//!
//! Scanline padding exists only at the I/O boundary; it is recomputed from the
//! current width whenever a row is read or written (see `bmp::decode` /
//! `bmp::encode`).

use crate::pixel::{BGR8, splat};

/// Padding bytes appended to a scanline of `width` pixels so the encoded row
/// occupies a multiple of 4 bytes.
pub fn row_padding(width: usize) -> usize {
    (4 - (3 * width) % 4) % 4
}

/// One scanline of pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub colours: Vec<BGR8>,
}

impl Row {
    pub fn new(width: usize) -> Self {
        Self {
            colours: vec![splat(0); width],
        }
    }
}

/// All scanlines of an image, stored in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    pub rows: Vec<Row>,
    /// Pixels per row; every row's length equals this.
    pub rows_size: usize,
}

impl PixelGrid {
    /// A zero-filled grid of `height` rows by `width` columns.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            rows: vec![Row::new(width); height],
            rows_size: width,
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows_size
    }

    /// Drop trailing rows beyond `new_height`.
    pub(crate) fn truncate_rows(&mut self, new_height: usize) {
        self.rows.truncate(new_height);
    }

    /// Drop trailing pixels of every row beyond `new_width`.
    pub(crate) fn truncate_cols(&mut self, new_width: usize) {
        if new_width >= self.rows_size {
            return;
        }
        for row in &mut self.rows {
            row.colours.truncate(new_width);
        }
        self.rows_size = new_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_arithmetic() {
        for w in 0..64usize {
            let p = row_padding(w);
            assert!(p <= 3);
            assert_eq!((3 * w + p) % 4, 0);
        }
        assert_eq!(row_padding(4), 0);
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
    }

    #[test]
    fn truncate_keeps_row_invariant() {
        let mut grid = PixelGrid::new(4, 5);
        grid.truncate_rows(2);
        grid.truncate_cols(3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        for row in &grid.rows {
            assert_eq!(row.colours.len(), grid.rows_size);
        }
        // truncating upward is a no-op
        grid.truncate_cols(10);
        assert_eq!(grid.width(), 3);
    }
}
