//! Pixel type and per-channel helpers.
//!
//! Pixels are kept in the file's native byte order (blue, green, red) via the
//! `rgb` crate's [`BGR8`], so encode/decode never swizzle channels.

pub use rgb::alt::BGR8;

/// A pixel with all three channels set to `v`.
pub fn splat(v: u8) -> BGR8 {
    BGR8 { b: v, g: v, r: v }
}

/// Integer luminance: `floor(0.299*R + 0.587*G + 0.114*B)`.
///
/// Computed in fixed point so the floor is exact; in particular a pixel with
/// equal channels maps to itself, which makes grayscaling idempotent.
pub fn luminance(px: BGR8) -> u8 {
    let weighted = 299 * u32::from(px.r) + 587 * u32::from(px.g) + 114 * u32::from(px.b);
    (weighted / 1000) as u8
}

/// Clamp an i32 channel sum into the 0..=255 range.
pub(crate) fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Round an f64 channel value and clamp into the 0..=255 range.
pub(crate) fn round_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
