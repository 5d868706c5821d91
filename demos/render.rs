//! Escape-time rasterizer.
//!
//! Renders the set over the full rectangle into a grayscale PGM and prints
//! the pixel-counting area as a sanity check against the Monte Carlo
//! estimates.
//!
//! Run with:
//! ```bash
//! cargo run --example render -- --width 900 --height 600 -i 500
//! ```

use std::path::PathBuf;

use clap::Parser;

use mandel_rs::domain::Domain;
use mandel_rs::render;

#[derive(Debug, Parser)]
#[command(author, version, about = "Rasterize the Mandelbrot set escape times")]
struct Cli {
    /// Raster width in pixels.
    #[clap(long, value_name = "INT", default_value = "900")]
    width: usize,

    /// Raster height in pixels.
    #[clap(long, value_name = "INT", default_value = "600")]
    height: usize,

    /// Escape-time iteration budget per pixel.
    #[arg(short, long, value_name = "INT", default_value = "500")]
    iterations: u32,

    /// Output PGM path.
    #[clap(short, long, value_name = "FILE", default_value = "mandelbrot.pgm")]
    output: PathBuf,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let grid = render::render(&Domain::full(), args.width, args.height, args.iterations);
    println!(
        "interior fraction: {:.4} (pixel-counting area {:.4})",
        grid.interior_fraction(),
        grid.pixel_area()
    );

    grid.write_pgm(&args.output)?;
    log::info!("wrote {}x{} raster to {}", args.width, args.height, args.output.display());

    Ok(())
}
