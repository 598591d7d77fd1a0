use std::path::PathBuf;

use argh::FromArgs;
use bmpfx::{Bitmap, BmpError, Limits, Pipeline};

/// Decode a 24-bit BMP, apply a chain of filters, write the result.
#[derive(FromArgs)]
struct Args {
    /// path to the input image
    #[argh(positional)]
    input: PathBuf,

    /// path to the output image
    #[argh(positional)]
    output: PathBuf,

    /// filters to apply, in order (see the no-argument help text)
    #[argh(positional, greedy)]
    filters: Vec<String>,
}

const HELP: &str = "\
Apply filters to a 24-bit uncompressed BMP image.

Usage: bmpfx <input file> <output file> [filters...]

Filters, applied in the order given:
    -crop <width> <height>  crop from the top-left corner, in pixels
    -gs                     convert to gray shades
    -neg                    convert to negative
    -sharp                  increase sharpness
    -edge <threshold>       highlight object edges; threshold is 0 to 255
    -blur <sigma>           Gaussian blur; larger sigma blurs more
    -acos                   inverse-cosine colour remap
";

// Refuse to allocate a grid for absurd declared dimensions.
const MAX_PIXELS: u64 = 1 << 28;

fn main() {
    env_logger::init();
    if std::env::args().len() == 1 {
        print!("{HELP}");
        return;
    }
    let args: Args = argh::from_env();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), BmpError> {
    let pipeline = Pipeline::parse(&args.filters)?;

    let data = std::fs::read(&args.input)?;
    let limits = Limits {
        max_pixels: Some(MAX_PIXELS),
        ..Limits::default()
    };
    let mut image = Bitmap::decode_with_limits(&data, Some(&limits))?;
    log::debug!(
        "decoded {}x{} image, {} filters to apply",
        image.width,
        image.height,
        pipeline.filters.len()
    );

    pipeline.apply_all(&mut image)?;
    image.write_file(&args.output)?;
    log::debug!("wrote {} bytes to {}", image.size, args.output.display());
    Ok(())
}
