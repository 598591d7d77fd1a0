//! BMP encoder: fixed 54-byte header pair plus padded 24-bit rows.

use rgb::ComponentBytes;

use super::{Bitmap, InfoHeader, PIXEL_DATA_OFFSET};
use crate::grid::row_padding;

pub(crate) fn encode_bitmap(image: &Bitmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.size as usize);
    write_headers(&mut out, image);

    // Padding comes from the current width, never from anything cached on
    // the rows; the in-memory grid is padding-free.
    let padding = row_padding(image.grid.width());
    for row in &image.grid.rows {
        out.extend_from_slice(row.colours.as_bytes());
        out.extend(core::iter::repeat_n(0u8, padding));
    }
    out
}

fn write_headers(out: &mut Vec<u8>, image: &Bitmap) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&image.size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

    // BITMAPINFOHEADER (40 bytes)
    out.extend_from_slice(&InfoHeader::HEADER_LEN.to_le_bytes());
    out.extend_from_slice(&image.info.width.to_le_bytes());
    out.extend_from_slice(&image.info.height.to_le_bytes());
    out.extend_from_slice(&InfoHeader::PLANES.to_le_bytes());
    out.extend_from_slice(&InfoHeader::BITS_PER_PIXEL.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&InfoHeader::IMAGE_DATA_SIZE.to_le_bytes());
    out.extend_from_slice(&InfoHeader::PIXELS_PER_METRE.to_le_bytes());
    out.extend_from_slice(&InfoHeader::PIXELS_PER_METRE.to_le_bytes());
    out.extend_from_slice(&[0u8; 8]); // palette counts, unused
}
