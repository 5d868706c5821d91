//! CSV persistence for per-round area estimates.
//!
//! The estimation core hands its per-round sequence to this layer; nothing
//! here feeds back into the simulation.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::sampling::Strategy;

/// Writes the per-round estimates as a single `Area` column, one row per
/// round.
pub fn write_area_csv<P: AsRef<Path>>(path: P, areas: &[f64]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "Area")?;
    for area in areas {
        writeln!(writer, "{}", area)?;
    }
    writer.flush()
}

/// The default output file name, derived from the run parameters.
pub fn csv_file_name(method: Strategy, samples: usize, rounds: usize, iterations: u32) -> String {
    format!(
        "mandelbrot-area-{}-n{}-s{}-i{}.csv",
        method, samples, rounds, iterations
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_round_trip() {
        let path = std::env::temp_dir().join("mandel-rs-export-test.csv");
        write_area_csv(&path, &[1.5, 1.25, 1.75]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["Area", "1.5", "1.25", "1.75"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_name_encodes_the_parameters() {
        let name = csv_file_name(Strategy::Orthogonal, 10_000, 50, 100);
        assert_eq!(name, "mandelbrot-area-orthogonal-n10000-s50-i100.csv");
    }
}
