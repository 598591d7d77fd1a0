//! # bmpfx
//!
//! Codec for the fixed uncompressed 24-bit BMP layout, plus a small engine of
//! in-place pixel filters: crop, grayscale, negative, sharpen, edge
//! detection, separable Gaussian blur, and an inverse-cosine remap.
//!
//! Pixels live in a padding-free grid of BGR triples; scanline padding is
//! recomputed at the I/O boundary only. Neighborhood transforms always build
//! a fresh grid and swap it in whole, so no pass ever reads pixels it has
//! already written.
//!
//! ## Non-Goals
//!
//! - Compressed or non-24-bit BMP variants, palettes
//! - Any container other than this one fixed layout
//! - Parallel or streaming decode
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfx::{Bitmap, Pipeline};
//!
//! let mut image = Bitmap::read_file("in.bmp")?;
//! let pipeline = Pipeline::parse(&["-gs", "-blur", "2"])?;
//! pipeline.apply_all(&mut image)?;
//! image.write_file("out.bmp")?;
//! # Ok::<(), bmpfx::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod error;
mod filter;
mod grid;
mod limits;
mod pixel;

// Re-exports
pub use bmp::{Bitmap, BitmapHeader, InfoHeader, PIXEL_DATA_OFFSET};
pub use error::BmpError;
pub use filter::{Filter, Kernel3, Pipeline, parse_filters};
pub use grid::{PixelGrid, Row, row_padding};
pub use limits::Limits;
pub use pixel::{BGR8, luminance, splat};
