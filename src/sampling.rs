//! Point-generation strategies for Monte Carlo estimation.
//!
//! All strategies share one contract: given a [`Domain`] and a sample
//! count, produce exactly that many points inside the domain. They differ
//! in the structure they impose on the sample:
//!
//! - [`Strategy::Random`] draws each coordinate independently. Unbiased,
//!   highest variance.
//! - [`Strategy::Hypercube`] (Latin hypercube) places `count` evenly spaced
//!   grid positions on each axis and pairs two independent random
//!   permutations of them, so every axis position is used exactly once.
//! - [`Strategy::Orthogonal`] (Latin square) additionally partitions the
//!   domain into `√count × √count` sub-blocks and puts exactly one point in
//!   each, with no two points sharing a lattice row or column. Requires a
//!   perfect-square count.
//!
//! The allocator and estimator stay strategy-agnostic: they hold a
//! `Strategy` value and call [`Strategy::generate`].

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Domain;
use crate::error::Error;

/// A point-sampling strategy, selected by name on the CLI surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Strategy {
    Random,
    Hypercube,
    Orthogonal,
}

impl Strategy {
    /// The CLI-facing name of the strategy.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Hypercube => "hypercube",
            Strategy::Orthogonal => "orthogonal",
        }
    }

    /// Whether sample counts must be perfect squares for this strategy.
    pub fn requires_square(self) -> bool {
        matches!(self, Strategy::Orthogonal)
    }

    /// Generates exactly `count` points within `domain`.
    ///
    /// Fails with [`Error::InvalidSampleCount`] when the strategy imposes a
    /// structural constraint that `count` violates, before drawing any
    /// random numbers.
    pub fn generate<R: Rng>(
        self,
        domain: &Domain,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Complex64>, Error> {
        match self {
            Strategy::Random => Ok(pure_random(domain, count, rng)),
            Strategy::Hypercube => Ok(latin_hypercube(domain, count, rng)),
            Strategy::Orthogonal => orthogonal(domain, count, rng),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Strategy::Random),
            "hypercube" => Ok(Strategy::Hypercube),
            "orthogonal" => Ok(Strategy::Orthogonal),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// `count` evenly spaced positions spanning `[min, max]`, endpoints
/// included. A single-position grid degenerates to `[min]`.
fn axis_grid(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count <= 1 {
        return vec![min; count];
    }
    let step = (max - min) / (count - 1) as f64;
    (0..count).map(|i| min + i as f64 * step).collect()
}

/// Independent uniform draws per axis.
pub fn pure_random<R: Rng>(domain: &Domain, count: usize, rng: &mut R) -> Vec<Complex64> {
    (0..count)
        .map(|_| {
            Complex64::new(
                rng.gen_range(domain.x_min()..domain.x_max()),
                rng.gen_range(domain.y_min()..domain.y_max()),
            )
        })
        .collect()
}

/// Latin hypercube sampling: one point per grid position on each axis.
///
/// The returned multiset of x-coordinates is exactly the `count`-position
/// grid on the x-axis (in shuffled order), and likewise for y. Only the
/// pairing between the axes is random.
pub fn latin_hypercube<R: Rng>(domain: &Domain, count: usize, rng: &mut R) -> Vec<Complex64> {
    let mut xs = axis_grid(domain.x_min(), domain.x_max(), count);
    let mut ys = axis_grid(domain.y_min(), domain.y_max(), count);
    xs.shuffle(rng);
    ys.shuffle(rng);
    xs.into_iter()
        .zip(ys)
        .map(|(x, y)| Complex64::new(x, y))
        .collect()
}

/// Orthogonal (Latin-square) sampling.
///
/// The `count`-position lattice on each axis is split into `√count` bands
/// of `√count` consecutive indices. Sub-block `(i, j)` draws one unused
/// column index from band `i` and one unused row index from band `j`,
/// without replacement, so every lattice row and column is used exactly
/// once and every sub-block receives exactly one point.
///
/// Fails with [`Error::InvalidSampleCount`] if `count` is not a perfect
/// square. The degenerate counts 0 and 1 (which the stratified allocator
/// can produce for low-weight strata) yield the empty set and the single
/// lattice corner respectively.
pub fn orthogonal<R: Rng>(
    domain: &Domain,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Complex64>, Error> {
    let side = (count as f64).sqrt().round() as usize;
    if side * side != count {
        return Err(Error::InvalidSampleCount(count));
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    // Lattice cell sizes; `count` positions per axis span the domain.
    let (dx, dy) = if count > 1 {
        let denom = (count - 1) as f64;
        (domain.width() / denom, domain.height() / denom)
    } else {
        (0.0, 0.0)
    };

    // Unused lattice indices, one pool per band.
    let band = |b: usize| (b * side..(b + 1) * side).collect::<Vec<usize>>();
    let mut cols: Vec<Vec<usize>> = (0..side).map(band).collect();
    let mut rows: Vec<Vec<usize>> = (0..side).map(band).collect();

    let mut points = Vec::with_capacity(count);
    for i in 0..side {
        for j in 0..side {
            let col = take_random(&mut cols[i], rng);
            let row = take_random(&mut rows[j], rng);
            points.push(Complex64::new(
                domain.x_min() + col as f64 * dx,
                domain.y_min() + row as f64 * dy,
            ));
        }
    }
    Ok(points)
}

fn take_random<R: Rng>(pool: &mut Vec<usize>, rng: &mut R) -> usize {
    let pick = rng.gen_range(0..pool.len());
    pool.swap_remove(pick)
}
