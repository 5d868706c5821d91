//! Area estimation driver.
//!
//! Mirrors the original experiment surface: pick a sampling method, run a
//! number of independent rounds, print the summary statistics, and write
//! the per-round estimates to a CSV file for downstream plotting.
//!
//! Run with:
//! ```bash
//! cargo run --example area -- hypercube -n 10000 -i 100 -s 50 --symmetry --seed 42
//! ```

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use mandel_rs::domain::Domain;
use mandel_rs::estimator::Estimator;
use mandel_rs::export;
use mandel_rs::sampling::Strategy;
use mandel_rs::stats::clt_confidence_interval;

#[derive(Debug, Parser)]
#[command(author, version, about = "Estimate the Mandelbrot set area via Monte Carlo sampling")]
struct Cli {
    /// Sampling method: random, hypercube, or orthogonal.
    #[arg(value_name = "METHOD", default_value = "random")]
    method: Strategy,

    /// Number of samples per round (a perfect square for orthogonal).
    #[arg(short = 'n', long = "samples", value_name = "INT", default_value = "500")]
    samples: usize,

    /// Escape-time iteration budget.
    #[arg(short, long, value_name = "INT", default_value = "10")]
    iterations: u32,

    /// Number of independent simulation rounds.
    #[arg(short, long, value_name = "INT", default_value = "10")]
    simulations: usize,

    /// Sample only the y >= 0 half and double the estimate.
    #[clap(long)]
    symmetry: bool,

    /// Stratified estimation over the weighted default partition.
    #[clap(long)]
    stratified: bool,

    /// RNG seed for a reproducible run.
    #[clap(long, value_name = "INT")]
    seed: Option<u64>,

    /// Output CSV path (derived from the parameters if omitted).
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
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

    let domain = if args.symmetry {
        Domain::upper_half()
    } else {
        Domain::full()
    };
    let estimator = Estimator::new(domain, args.method, args.samples, args.iterations)
        .with_symmetry(args.symmetry);

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let result = estimator.run(args.simulations, args.stratified, &mut rng)?;
    let stats = result.statistics();

    let mode = if args.stratified { "stratified " } else { "" };
    println!(
        "Area found using {}{} sampling: {}",
        mode, args.method, result.mean
    );
    println!("Sample variance: {}", stats.variance);
    println!("Std deviation:   {}", stats.std_dev);
    if args.simulations > 1 {
        println!("95% CI:          {}", clt_confidence_interval(&stats, 0.95));
    }

    let path = args.output.unwrap_or_else(|| {
        PathBuf::from(export::csv_file_name(
            args.method,
            args.samples,
            args.simulations,
            args.iterations,
        ))
    });
    export::write_area_csv(&path, &result.areas)?;
    log::info!("wrote {} round estimates to {}", result.areas.len(), path.display());

    Ok(())
}
