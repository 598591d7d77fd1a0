//! The filter engine: a closed set of in-place bitmap transforms.

mod blur;
mod convolve;
mod parse;

use std::num::NonZeroU32;

use crate::bmp::Bitmap;
use crate::error::BmpError;
use crate::pixel::{luminance, round_channel, splat};

pub use convolve::Kernel3;
pub use parse::parse_filters;

const SHARPEN_KERNEL: Kernel3 = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];
const EDGE_KERNEL: Kernel3 = [[0, -1, 0], [-1, 4, -1], [0, -1, 0]];

/// One pixel transform. The set is closed and small, so a tagged enum
/// dispatched through [`Filter::apply`] replaces open polymorphism.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Truncate to the given dimensions, anchored at the first decoded pixel.
    Crop { width: i32, height: i32 },
    /// Channel-uniform luminance.
    Grayscale,
    /// Invert every channel.
    Negative,
    /// 3x3 sharpening kernel.
    Sharpen,
    /// Grayscale, Laplacian kernel, then binarize on the threshold.
    EdgeDetect { threshold: u8 },
    /// Two-pass separable Gaussian blur.
    Blur { sigma: NonZeroU32 },
    /// Per-channel inverse-cosine remap.
    AcosRemap,
}

impl Filter {
    /// Apply this filter to `image` in place.
    ///
    /// Only `Crop` can fail (non-positive target dimensions); parameter
    /// domains for the other variants are enforced at construction.
    pub fn apply(&self, image: &mut Bitmap) -> Result<(), BmpError> {
        match *self {
            Filter::Crop { width, height } => return image.crop(width, height),
            Filter::Grayscale => grayscale(image),
            Filter::Negative => for_each_pixel(image, |v| 255 - v),
            Filter::Sharpen => image.apply_kernel(&SHARPEN_KERNEL),
            Filter::EdgeDetect { threshold } => edge_detect(image, threshold),
            Filter::Blur { sigma } => image.gaussian_blur(sigma),
            Filter::AcosRemap => for_each_pixel(image, acos_remap),
        }
        Ok(())
    }
}

fn for_each_pixel(image: &mut Bitmap, f: impl Fn(u8) -> u8) {
    for row in &mut image.grid.rows {
        for px in &mut row.colours {
            px.b = f(px.b);
            px.g = f(px.g);
            px.r = f(px.r);
        }
    }
}

fn grayscale(image: &mut Bitmap) {
    for row in &mut image.grid.rows {
        for px in &mut row.colours {
            *px = splat(luminance(*px));
        }
    }
}

/// `v -> round(255 * acos(v/255))`, saturated into the channel range.
/// The acos argument is clamped into [0, 1] to stay in its domain.
fn acos_remap(v: u8) -> u8 {
    let x = (f64::from(v) / 255.0).clamp(0.0, 1.0);
    round_channel(255.0 * x.acos())
}

fn edge_detect(image: &mut Bitmap, threshold: u8) {
    grayscale(image);
    image.apply_kernel(&EDGE_KERNEL);
    for row in &mut image.grid.rows {
        for px in &mut row.colours {
            // channels are equal after grayscale + uniform kernel; the blue
            // channel decides
            *px = if px.b > threshold { splat(255) } else { splat(0) };
        }
    }
}

/// An ordered sequence of filters applied to one bitmap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pipeline {
    pub filters: Vec<Filter>,
}

impl Pipeline {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    /// Build a pipeline from command-line style tokens, e.g.
    /// `["-crop", "100", "80", "-neg"]`.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, BmpError> {
        Ok(Self::new(parse_filters(tokens)?))
    }

    /// Apply every filter in order. Stops at the first failure.
    pub fn apply_all(&self, image: &mut Bitmap) -> Result<(), BmpError> {
        for filter in &self.filters {
            filter.apply(image)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::bmp::{Bitmap, BitmapHeader, InfoHeader};
    use crate::grid::PixelGrid;
    use crate::pixel::BGR8;

    /// Build a bitmap straight from pixel rows (top row first).
    pub(crate) fn bitmap_from_rows(pixels: Vec<Vec<BGR8>>) -> Bitmap {
        let height = pixels.len();
        let width = pixels[0].len();
        let mut grid = PixelGrid::new(height, width);
        for (y, row) in pixels.into_iter().enumerate() {
            assert_eq!(row.len(), width);
            grid.rows[y].colours = row;
        }
        let mut image = Bitmap {
            header: BitmapHeader::default(),
            info: InfoHeader {
                width: width as i32,
                height: height as i32,
            },
            grid,
            width: width as i32,
            height: height as i32,
            size: 0,
        };
        image.renew_size();
        image
    }
}
