//! Simulation driver: repeated independent estimation rounds.
//!
//! An [`Estimator`] owns the simulation parameters (domain, strategy,
//! per-round sample count, iteration budget) and runs rounds either flat
//! over the whole configured domain or through a [`StrataCollection`].
//! Rounds share nothing but the RNG; the per-round estimates come back
//! unaggregated so downstream code can study variance and convergence.

use log::{debug, info};
use rand::Rng;

use crate::domain::Domain;
use crate::error::Error;
use crate::escape;
use crate::sampling::Strategy;
use crate::stats::{self, Statistics};
use crate::strata::StrataCollection;

/// Simulation parameters for one run.
#[derive(Debug, Clone)]
pub struct Estimator {
    domain: Domain,
    strategy: Strategy,
    samples: usize,
    max_iterations: u32,
    symmetry: bool,
}

impl Estimator {
    /// Creates an estimator over `domain` drawing `samples` points per
    /// round with the given strategy and escape-time budget.
    ///
    /// # Panics
    ///
    /// Panics if `samples` or `max_iterations` is zero.
    pub fn new(domain: Domain, strategy: Strategy, samples: usize, max_iterations: u32) -> Self {
        assert!(samples > 0, "sample count must be positive");
        assert!(max_iterations > 0, "iteration budget must be positive");
        Self {
            domain,
            strategy,
            samples,
            max_iterations,
            symmetry: false,
        }
    }

    /// Treat the configured domain as the `y >= 0` half and double flat
    /// estimates accordingly, so both halves of the set are accounted for.
    pub fn with_symmetry(mut self, symmetry: bool) -> Self {
        self.symmetry = symmetry;
        self
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// One flat estimation round: sample the configured domain, test every
    /// point against the membership oracle, scale the hit ratio by the
    /// domain area (doubled under the symmetry flag).
    pub fn estimate_once<R: Rng>(&self, rng: &mut R) -> Result<f64, Error> {
        let points = self.strategy.generate(&self.domain, self.samples, rng)?;
        let hits = points
            .iter()
            .filter(|&&c| escape::in_set(c, self.max_iterations))
            .count();
        let mut area = self.domain.area() * hits as f64 / self.samples as f64;
        if self.symmetry {
            area *= 2.0;
        }
        Ok(area)
    }

    /// Runs `rounds` independent rounds and collects the per-round
    /// estimates. With `stratified` set, the rounds go through a fresh
    /// [`StrataCollection::default_partition`] instead of the flat domain.
    pub fn run<R: Rng>(
        &self,
        rounds: usize,
        stratified: bool,
        rng: &mut R,
    ) -> Result<SimulationResult, Error> {
        if stratified {
            let mut collection = StrataCollection::default_partition();
            self.run_with_collection(rounds, &mut collection, rng)
        } else {
            info!(
                "running {} flat rounds: {} x {} samples, {} iterations",
                rounds, self.strategy, self.samples, self.max_iterations
            );
            let mut areas = Vec::with_capacity(rounds);
            for round in 0..rounds {
                let area = self.estimate_once(rng)?;
                debug!("round {}: area = {}", round, area);
                areas.push(area);
            }
            Ok(SimulationResult::new(areas))
        }
    }

    /// Stratified variant reusing a caller-supplied collection. The
    /// collection is re-allocated every round; only its sample counts
    /// change between rounds.
    pub fn run_with_collection<R: Rng>(
        &self,
        rounds: usize,
        collection: &mut StrataCollection,
        rng: &mut R,
    ) -> Result<SimulationResult, Error> {
        info!(
            "running {} stratified rounds over {} strata: {} x {} samples, {} iterations",
            rounds,
            collection.len(),
            self.strategy,
            self.samples,
            self.max_iterations
        );
        let mut areas = Vec::with_capacity(rounds);
        for round in 0..rounds {
            let area =
                collection.estimate_area(self.samples, self.strategy, self.max_iterations, rng)?;
            debug!("round {}: area = {}", round, area);
            areas.push(area);
        }
        Ok(SimulationResult::new(areas))
    }
}

/// The outcome of one run: the mean plus the raw per-round estimates, in
/// round order.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Arithmetic mean of the per-round estimates.
    pub mean: f64,
    /// One area estimate per round, never mutated after the run.
    pub areas: Vec<f64>,
}

impl SimulationResult {
    fn new(areas: Vec<f64>) -> Self {
        let mean = if areas.is_empty() {
            0.0
        } else {
            areas.iter().sum::<f64>() / areas.len() as f64
        };
        Self { mean, areas }
    }

    /// Summary statistics over the per-round estimates.
    pub fn statistics(&self) -> Statistics {
        Statistics::from_sample(&self.areas)
    }

    /// Cumulative-mean convergence trace, one entry per round.
    pub fn convergence(&self) -> Vec<f64> {
        stats::cumulative_mean(&self.areas)
    }
}
