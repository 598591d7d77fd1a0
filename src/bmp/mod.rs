//! Uncompressed 24-bit BMP container: headers, pixel grid, codec entry points.

mod decode;
mod encode;

use std::path::Path;

use crate::error::BmpError;
use crate::grid::{PixelGrid, row_padding};
use crate::limits::Limits;

/// Byte offset where pixel data begins; headers occupy exactly this much.
pub const PIXEL_DATA_OFFSET: u32 = 54;

/// BMP file header: magic, total size, pixel data offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitmapHeader {
    pub file_size: u32,
    pub pixel_data_offset: u32,
}

/// BITMAPINFOHEADER fields we carry. Everything else is fixed for this
/// format (length 40, planes 1, 24 bpp, no compression, 2835 ppm) and is
/// emitted as constants on encode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InfoHeader {
    pub width: i32,
    pub height: i32,
}

impl InfoHeader {
    pub const HEADER_LEN: u32 = 40;
    pub const PLANES: u16 = 1;
    pub const BITS_PER_PIXEL: u16 = 24;
    pub const IMAGE_DATA_SIZE: u32 = 16;
    pub const PIXELS_PER_METRE: u32 = 2835;
}

/// A fully decoded image: headers, dimensions, and the owned pixel grid.
///
/// `width`/`height` mirror `info.width`/`info.height`; `size` is derived and
/// refreshed by [`Bitmap::renew_size`] after any dimension change. A negative
/// stored height is accepted on decode (top-down row order in the wild); the
/// row count is always `|height|`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub header: BitmapHeader,
    pub info: InfoHeader,
    pub grid: PixelGrid,
    pub width: i32,
    pub height: i32,
    pub size: u32,
}

impl Bitmap {
    /// Decode a BMP from bytes.
    pub fn decode(data: &[u8]) -> Result<Self, BmpError> {
        Self::decode_with_limits(data, None)
    }

    /// Decode a BMP from bytes, rejecting images whose declared dimensions
    /// exceed `limits` before any grid allocation happens.
    pub fn decode_with_limits(data: &[u8], limits: Option<&Limits>) -> Result<Self, BmpError> {
        decode::decode_bitmap(data, limits)
    }

    /// Encode to a fresh byte buffer. Row padding is recomputed from the
    /// current width and emitted as zero bytes.
    pub fn encode(&self) -> Vec<u8> {
        encode::encode_bitmap(self)
    }

    /// Read and decode a BMP file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, BmpError> {
        let data = std::fs::read(path)?;
        Self::decode(&data)
    }

    /// Encode and write to a file. A failed write leaves the output file in
    /// an undefined state; callers must not rely on partial output.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), BmpError> {
        std::fs::write(path, self.encode())?;
        Ok(())
    }

    /// Truncate to `new_width` x `new_height`, anchored at the first decoded
    /// row and column. Never grows; cropping to dimensions at or above the
    /// current ones is a no-op.
    pub fn crop(&mut self, new_width: i32, new_height: i32) -> Result<(), BmpError> {
        if new_width <= 0 || new_height <= 0 {
            return Err(BmpError::invalid_arg(
                "width and height can't be less or equal to 0",
            ));
        }
        self.set_height(new_height);
        self.set_width(new_width);
        Ok(())
    }

    fn set_height(&mut self, new_height: i32) {
        let rows = self.grid.height().min(new_height as usize);
        self.grid.truncate_rows(rows);
        // preserve the stored sign for top-down images
        self.height = if self.height < 0 {
            -(rows as i32)
        } else {
            rows as i32
        };
        self.info.height = self.height;
        self.renew_size();
    }

    fn set_width(&mut self, new_width: i32) {
        let width = self.grid.width().min(new_width as usize);
        self.grid.truncate_cols(width);
        self.width = width as i32;
        self.info.width = self.width;
        self.renew_size();
    }

    /// Recompute the derived total file size from the current dimensions.
    ///
    /// Saturates at `u32::MAX` when the dimensions describe more data than
    /// the format's 32-bit size field can express.
    pub fn renew_size(&mut self) {
        let width = self.width.unsigned_abs() as u64;
        let rows = self.height.unsigned_abs() as u64;
        let stride = 3 * width + row_padding(width as usize) as u64;
        let total = u64::from(PIXEL_DATA_OFFSET) + rows * stride;
        self.size = u32::try_from(total).unwrap_or(u32::MAX);
    }

    /// Replace the pixel grid wholesale. Used by the transform primitives,
    /// which always populate a fresh grid before swapping it in.
    pub(crate) fn replace_grid(&mut self, grid: PixelGrid) {
        debug_assert_eq!(grid.height(), self.height.unsigned_abs() as usize);
        debug_assert_eq!(grid.width(), self.width.unsigned_abs() as usize);
        self.grid = grid;
    }
}
