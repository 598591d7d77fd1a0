//! BMP decoder for the fixed uncompressed 24-bit layout.
//!
//! Reads from a `&[u8]` cursor. Fields the format fixes (bit depth,
//! compression, palette, resolution) are skipped unchecked; dimensions and
//! magic are the only header fields that matter here.

use rgb::FromSlice;

use super::{Bitmap, BitmapHeader, InfoHeader};
use crate::error::BmpError;
use crate::grid::{PixelGrid, Row, row_padding};
use crate::limits::Limits;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip(&mut self, n: usize) -> Result<(), BmpError> {
        let new_pos = self.pos.checked_add(n).ok_or(BmpError::UnexpectedEof)?;
        if new_pos > self.data.len() {
            return Err(BmpError::UnexpectedEof);
        }
        self.pos = new_pos;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        if self.pos + N > self.data.len() {
            return Err(BmpError::UnexpectedEof);
        }
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(buf)
    }

    fn read_slice(&mut self, n: usize) -> Result<&'a [u8], BmpError> {
        let end = self.pos.checked_add(n).ok_or(BmpError::UnexpectedEof)?;
        if end > self.data.len() {
            return Err(BmpError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn get_u32_le(&mut self) -> Result<u32, BmpError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_i32_le(&mut self) -> Result<i32, BmpError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes()?))
    }
}

// ── Header parsing ──────────────────────────────────────────────────

fn parse_file_header(cur: &mut Cursor) -> Result<BitmapHeader, BmpError> {
    let magic: [u8; 2] = cur.read_fixed_bytes()?;
    if &magic != b"BM" {
        return Err(BmpError::UnrecognizedFormat);
    }
    let file_size = cur.get_u32_le()?;
    cur.skip(4)?; // reserved
    let pixel_data_offset = cur.get_u32_le()?;
    Ok(BitmapHeader {
        file_size,
        pixel_data_offset,
    })
}

fn parse_info_header(cur: &mut Cursor) -> Result<InfoHeader, BmpError> {
    cur.skip(4)?; // info header length, fixed at 40
    let width = cur.get_i32_le()?;
    let height = cur.get_i32_le()?;
    // planes, bit depth, compression, sizes, resolution, palette counts
    cur.skip(28)?;
    if width < 0 {
        return Err(BmpError::InvalidHeader(format!("negative width {width}")));
    }
    Ok(InfoHeader { width, height })
}

// ── Pixel rows ──────────────────────────────────────────────────────

fn decode_pixels(cur: &mut Cursor, width: usize, rows: usize) -> Result<PixelGrid, BmpError> {
    let padding = row_padding(width);
    let mut grid = PixelGrid {
        rows: Vec::with_capacity(rows),
        rows_size: width,
    };
    for _ in 0..rows {
        let bytes = cur.read_slice(3 * width)?;
        grid.rows.push(Row {
            colours: bytes.as_bgr().to_vec(),
        });
        cur.skip(padding)?;
    }
    Ok(grid)
}

// ── Entry point ─────────────────────────────────────────────────────

pub(crate) fn decode_bitmap(data: &[u8], limits: Option<&Limits>) -> Result<Bitmap, BmpError> {
    let mut cur = Cursor::new(data);
    let header = parse_file_header(&mut cur)?;
    let info = parse_info_header(&mut cur)?;

    let rows = info.height.unsigned_abs();
    if let Some(limits) = limits {
        limits.check(info.width as u32, rows)?;
    }

    let grid = decode_pixels(&mut cur, info.width as usize, rows as usize)?;

    let mut image = Bitmap {
        header,
        info,
        grid,
        width: info.width,
        height: info.height,
        size: 0,
    };
    image.renew_size();
    Ok(image)
}
