//! Weighted spatial stratification of the sampling domain.
//!
//! The domain's `y >= 0` half is tiled by hand-tuned rectangles, each with
//! an importance weight. The sample budget is split across strata in
//! proportion to weight, every stratum estimates the set area inside its
//! own rectangle, and the sum of the pieces doubles into a full-set
//! estimate (symmetry about the real axis).

use log::debug;
use rand::Rng;

use crate::domain::Domain;
use crate::error::Error;
use crate::escape;
use crate::sampling::Strategy;

/// Tolerance for the weight-sum and covered-area invariants.
pub const PARTITION_TOLERANCE: f64 = 1e-3;

/// A weighted sub-region of the sampling domain.
///
/// Boundary, weight, and area are fixed at construction. The assigned
/// sample count is set by [`StrataCollection::allocate`] once per round
/// and consumed by [`Stratum::estimate`].
#[derive(Debug, Clone)]
pub struct Stratum {
    bounds: Domain,
    weight: f64,
    samples: Option<usize>,
}

impl Stratum {
    /// # Panics
    ///
    /// Panics if `weight` is outside `(0, 1]`.
    pub fn new(bounds: Domain, weight: f64) -> Self {
        assert!(
            weight > 0.0 && weight <= 1.0,
            "stratum weight must lie in (0, 1], got {}",
            weight
        );
        Self {
            bounds,
            weight,
            samples: None,
        }
    }

    pub fn bounds(&self) -> &Domain {
        &self.bounds
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Area of the stratum's rectangle.
    pub fn area(&self) -> f64 {
        self.bounds.area()
    }

    /// The currently assigned sample count, if any.
    pub fn samples(&self) -> Option<usize> {
        self.samples
    }

    /// Overwrites the assigned sample count.
    pub fn set_samples(&mut self, n: usize) {
        self.samples = Some(n);
    }

    /// Adjusts the assigned count by `delta`. The delta is signed: the
    /// orthogonal allocator's nearest-square rounding can overshoot the
    /// total, in which case the absorbing stratum gives samples back.
    ///
    /// # Panics
    ///
    /// Panics if no count has been assigned yet, or if the adjustment would
    /// drive the count below zero.
    pub fn add_samples(&mut self, delta: i64) {
        let current = self.samples.expect("sample count assigned before add_samples") as i64;
        let next = current + delta;
        assert!(
            next >= 0,
            "sample adjustment {} would drive the count below zero (had {})",
            delta,
            current
        );
        self.samples = Some(next as usize);
    }

    /// Estimates the set area inside this stratum: generate the assigned
    /// number of points over the stratum's own rectangle, test each against
    /// the membership oracle, and scale the hit ratio by the rectangle
    /// area. A zero-sample stratum contributes nothing.
    ///
    /// The allocator parks the flat remainder on one stratum, so under
    /// [`Strategy::Orthogonal`] the assigned count here need not be a
    /// perfect square. That stratum samples the largest square that fits
    /// instead of failing; its orthogonality is degraded, not lost.
    ///
    /// # Panics
    ///
    /// Panics if called before a sample count has been assigned; that is a
    /// caller-ordering bug, not a runtime condition.
    pub fn estimate<R: Rng>(
        &self,
        strategy: Strategy,
        max_iterations: u32,
        rng: &mut R,
    ) -> Result<f64, Error> {
        let assigned = self.samples.expect("sample count assigned before estimate");
        let count = if strategy.requires_square() {
            largest_square(assigned)
        } else {
            assigned
        };
        if count == 0 {
            return Ok(0.0);
        }
        if count != assigned {
            debug!(
                "estimate: degrading non-square count {} to {} points",
                assigned, count
            );
        }
        let points = strategy.generate(&self.bounds, count, rng)?;
        let hits = points
            .iter()
            .filter(|&&c| escape::in_set(c, max_iterations))
            .count();
        Ok(self.area() * hits as f64 / count as f64)
    }
}

/// An ordered set of strata tiling one symmetric half of the domain,
/// sorted by descending weight.
///
/// # Invariants
///
/// - weights sum to 1 within [`PARTITION_TOLERANCE`]
/// - after [`allocate`](StrataCollection::allocate), the assigned counts
///   sum to exactly the requested total
#[derive(Debug, Clone)]
pub struct StrataCollection {
    strata: Vec<Stratum>,
}

impl StrataCollection {
    /// Builds a collection from an explicit `(boundary, weight)` table.
    ///
    /// The table order is preserved among equal weights, which pins down
    /// which stratum absorbs the allocation remainder.
    ///
    /// # Panics
    ///
    /// Panics if the table is empty or its weights do not sum to 1 within
    /// [`PARTITION_TOLERANCE`].
    pub fn new(regions: Vec<(Domain, f64)>) -> Self {
        assert!(!regions.is_empty(), "a strata collection needs at least one region");
        let total: f64 = regions.iter().map(|(_, w)| w).sum();
        assert!(
            (total - 1.0).abs() <= PARTITION_TOLERANCE,
            "stratum weights must sum to 1, got {}",
            total
        );

        let mut strata: Vec<Stratum> = regions
            .into_iter()
            .map(|(bounds, weight)| Stratum::new(bounds, weight))
            .collect();
        strata.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap());
        Self { strata }
    }

    /// The hand-tuned 18-region partition of `(-2, 0.6) × (0, 1.2)`.
    ///
    /// Regions hugging the set's boundary carry the most weight, regions
    /// deep inside or far outside the set the least. The rectangles tile
    /// the half-domain exactly (combined area 3.12).
    pub fn default_partition() -> Self {
        // Mostly interior or empty.
        let dull = 0.02;
        // Straddling the fractal boundary.
        let rich = 0.08;
        // Somewhere in between.
        let mid = 0.045;

        Self::new(vec![
            (Domain::new(-0.5, 0.2, 0.0, 0.45), dull),
            (Domain::new(-2.0, -1.75, 0.45, 1.2), dull),
            (Domain::new(-1.3, -0.8, 0.0, 0.2), dull),
            (Domain::new(-0.7, -0.5, 0.0, 0.2), dull),
            (Domain::new(-0.6, -0.5, 0.2, 0.4), dull),
            (Domain::new(-2.0, -1.3, 0.0, 0.2), rich),
            (Domain::new(-0.8, -0.7, 0.0, 0.2), rich),
            (Domain::new(0.2, 0.6, 0.0, 0.45), rich),
            (Domain::new(0.1, 0.6, 0.45, 0.7), rich),
            (Domain::new(-0.35, 0.1, 0.45, 1.2), rich),
            (Domain::new(-0.7, -0.35, 0.45, 0.8), rich),
            (Domain::new(-0.6, -0.5, 0.4, 0.45), rich),
            (Domain::new(-0.8, -0.6, 0.2, 0.45), rich),
            (Domain::new(-1.4, -0.8, 0.2, 0.45), rich),
            (Domain::new(0.1, 0.6, 0.7, 1.2), mid),
            (Domain::new(-0.7, -0.35, 0.8, 1.2), mid),
            (Domain::new(-1.75, -0.7, 0.45, 1.2), mid),
            (Domain::new(-2.0, -1.4, 0.2, 0.45), mid),
        ])
    }

    pub fn len(&self) -> usize {
        self.strata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strata.is_empty()
    }

    pub fn strata(&self) -> &[Stratum] {
        &self.strata
    }

    /// Combined area of all strata.
    pub fn covered_area(&self) -> f64 {
        self.strata.iter().map(Stratum::area).sum()
    }

    /// Splits `total_samples` across strata proportionally to weight.
    ///
    /// Each stratum receives `floor(total * weight)` samples, except under
    /// [`Strategy::Orthogonal`] where it receives the nearest perfect
    /// square of that share so the per-stratum counts stay valid. The
    /// leftover goes to the highest-weight stratum, or to the
    /// *lowest*-weight stratum under the orthogonal strategy: an arbitrary
    /// remainder breaks the perfect-square structure of whichever stratum
    /// absorbs it, so it is parked on the stratum with the smallest stake.
    ///
    /// # Panics
    ///
    /// Panics if the assigned counts do not sum to exactly `total_samples`
    /// afterwards.
    pub fn allocate(&mut self, total_samples: usize, strategy: Strategy) {
        for stratum in &mut self.strata {
            let share = total_samples as f64 * stratum.weight();
            let count = if strategy.requires_square() {
                nearest_square(share)
            } else {
                share as usize
            };
            stratum.set_samples(count);
        }

        let assigned: i64 = self.strata.iter().map(|s| s.samples.unwrap() as i64).sum();
        let mut remainder = total_samples as i64 - assigned;
        debug!(
            "allocate(total = {}, strategy = {}): remainder {}",
            total_samples, strategy, remainder
        );

        // The whole remainder lands on the highest-weight stratum, or on
        // the lowest-weight one under the orthogonal strategy (its
        // nearest-square counts can overshoot the total, and a deficit
        // larger than the absorber holds spills into its neighbors,
        // clamping each count at zero).
        let order: Box<dyn Iterator<Item = usize>> = if strategy.requires_square() {
            Box::new((0..self.strata.len()).rev())
        } else {
            Box::new(0..self.strata.len())
        };
        for idx in order {
            if remainder == 0 {
                break;
            }
            let held = self.strata[idx].samples.unwrap() as i64;
            let delta = remainder.max(-held);
            self.strata[idx].add_samples(delta);
            remainder -= delta;
        }

        let check: usize = self.strata.iter().map(|s| s.samples.unwrap()).sum();
        assert_eq!(
            check, total_samples,
            "allocated sample counts must sum to the requested total"
        );
    }

    /// Allocates the budget, sums the per-stratum estimates, and doubles
    /// the result to cover the unmodeled `y < 0` half.
    pub fn estimate_area<R: Rng>(
        &mut self,
        total_samples: usize,
        strategy: Strategy,
        max_iterations: u32,
        rng: &mut R,
    ) -> Result<f64, Error> {
        self.allocate(total_samples, strategy);
        let mut area = 0.0;
        for stratum in &self.strata {
            area += stratum.estimate(strategy, max_iterations, rng)?;
        }
        Ok(area * 2.0)
    }
}

/// The perfect square nearest to `share`: round the square root, then
/// square it again.
fn nearest_square(share: f64) -> usize {
    let side = share.sqrt().round();
    (side * side) as usize
}

/// The largest perfect square `<= count`.
fn largest_square(count: usize) -> usize {
    let side = (count as f64).sqrt() as usize;
    side * side
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use test_log::test;

    use super::*;

    fn unit_square() -> Domain {
        Domain::new(0.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn test_stratum_area_is_derived_from_bounds() {
        let s = Stratum::new(Domain::new(-2.0, -1.3, 0.0, 0.2), 0.08);
        assert!((s.area() - 0.7 * 0.2).abs() < 1e-12);
        assert_eq!(s.samples(), None);
    }

    #[test]
    fn test_stratum_sample_accounting() {
        let mut s = Stratum::new(unit_square(), 0.5);
        s.set_samples(10);
        s.add_samples(5);
        assert_eq!(s.samples(), Some(15));
        s.add_samples(-3);
        assert_eq!(s.samples(), Some(12));
    }

    #[test]
    #[should_panic(expected = "sample count assigned before estimate")]
    fn test_estimate_before_allocation_panics() {
        let s = Stratum::new(unit_square(), 0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let _ = s.estimate(Strategy::Random, 10, &mut rng);
    }

    #[test]
    fn test_stratum_deep_inside_the_set_estimates_its_own_area() {
        // The whole rectangle sits inside the main cardioid.
        let mut s = Stratum::new(Domain::new(-0.2, 0.0, 0.0, 0.2), 1.0);
        s.set_samples(64);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let est = s.estimate(Strategy::Hypercube, 200, &mut rng).unwrap();
        assert!((est - s.area()).abs() < 1e-12);
    }

    #[test]
    fn test_default_partition_invariants() {
        let collection = StrataCollection::default_partition();
        assert_eq!(collection.len(), 18);

        let weight_sum: f64 = collection.strata().iter().map(Stratum::weight).sum();
        assert!((weight_sum - 1.0).abs() <= PARTITION_TOLERANCE);
        assert!((collection.covered_area() - 2.6 * 1.2).abs() <= PARTITION_TOLERANCE);

        // Descending by weight, so the remainder targets are well-defined.
        let weights: Vec<f64> = collection.strata().iter().map(Stratum::weight).collect();
        for pair in weights.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    #[should_panic(expected = "must sum to 1")]
    fn test_bad_weight_table_panics() {
        StrataCollection::new(vec![
            (unit_square(), 0.5),
            (Domain::new(1.0, 2.0, 0.0, 1.0), 0.3),
        ]);
    }

    #[test]
    fn test_allocation_preserves_the_total() {
        let mut collection = StrataCollection::default_partition();
        for strategy in [Strategy::Random, Strategy::Hypercube, Strategy::Orthogonal] {
            for total in [0, 1, 97, 1000, 12_345] {
                collection.allocate(total, strategy);
                let sum: usize = collection
                    .strata()
                    .iter()
                    .map(|s| s.samples().unwrap())
                    .sum();
                assert_eq!(sum, total, "{} with total {}", strategy, total);
            }
        }
    }

    #[test]
    fn test_orthogonal_allocation_keeps_squares_except_the_absorber() {
        let mut collection = StrataCollection::default_partition();
        collection.allocate(1000, Strategy::Orthogonal);
        let last = collection.len() - 1;
        for (idx, stratum) in collection.strata().iter().enumerate() {
            if idx == last {
                continue;
            }
            let n = stratum.samples().unwrap();
            let side = (n as f64).sqrt().round() as usize;
            assert_eq!(side * side, n, "stratum {} got non-square count {}", idx, n);
        }
    }

    #[test]
    fn test_remainder_goes_to_the_right_stratum() {
        // Two strata, weights 0.7 / 0.3, total 10: floor gives 7 + 3 with
        // zero remainder, so use a total that leaves one over.
        let regions = vec![
            (unit_square(), 0.7),
            (Domain::new(1.0, 2.0, 0.0, 1.0), 0.3),
        ];

        let mut collection = StrataCollection::new(regions.clone());
        collection.allocate(9, Strategy::Random);
        // floor(6.3) = 6, floor(2.7) = 2, remainder 1 -> highest weight.
        assert_eq!(collection.strata()[0].samples(), Some(7));
        assert_eq!(collection.strata()[1].samples(), Some(2));

        let mut collection = StrataCollection::new(regions);
        collection.allocate(9, Strategy::Orthogonal);
        // nearest squares: 6.3 -> 9, 2.7 -> 4, deficit 4 -> lowest weight.
        assert_eq!(collection.strata()[0].samples(), Some(9));
        assert_eq!(collection.strata()[1].samples(), Some(0));
    }

    #[test]
    fn test_orthogonal_deficit_spills_past_a_drained_absorber() {
        let regions = vec![
            (unit_square(), 0.8),
            (Domain::new(1.0, 2.0, 0.0, 1.0), 0.2),
        ];
        let mut collection = StrataCollection::new(regions);

        // Shares 8.8 and 2.2 round to 9 and 1; the leftover lands on the
        // low-weight absorber.
        collection.allocate(11, Strategy::Orthogonal);
        assert_eq!(collection.strata()[0].samples(), Some(9));
        assert_eq!(collection.strata()[1].samples(), Some(2));

        // Shares 2.4 and 0.6 round to 4 and 1, a deficit of 2. The
        // absorber only holds 1, so the rest comes off the next stratum.
        collection.allocate(3, Strategy::Orthogonal);
        assert_eq!(collection.strata()[1].samples(), Some(0));
        assert_eq!(collection.strata()[0].samples(), Some(3));
    }

    #[test]
    fn test_nearest_square() {
        assert_eq!(nearest_square(0.0), 0);
        assert_eq!(nearest_square(2.0), 1);
        assert_eq!(nearest_square(6.3), 9);
        assert_eq!(nearest_square(45.0), 49);
        assert_eq!(nearest_square(80.0), 81);
        assert_eq!(nearest_square(100.0), 100);
    }

    #[test]
    fn test_largest_square() {
        assert_eq!(largest_square(0), 0);
        assert_eq!(largest_square(1), 1);
        assert_eq!(largest_square(11), 9);
        assert_eq!(largest_square(111), 100);
        assert_eq!(largest_square(396), 361);
        assert_eq!(largest_square(400), 400);
    }

    #[test]
    fn test_non_square_stratum_degrades_orthogonal_sampling() {
        // 111 samples degrade to the 100-point Latin square; the estimate
        // must match an explicitly square-count run on the same seed.
        let mut degraded = Stratum::new(unit_square(), 0.5);
        degraded.set_samples(111);
        let mut exact = Stratum::new(unit_square(), 0.5);
        exact.set_samples(100);

        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let from_degraded = degraded
            .estimate(Strategy::Orthogonal, 50, &mut rng)
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let from_exact = exact.estimate(Strategy::Orthogonal, 50, &mut rng).unwrap();

        assert_eq!(from_degraded, from_exact);
    }

    #[test]
    fn test_orthogonal_estimate_area_survives_a_non_square_absorber() {
        // Totals whose remainder leaves the absorber with a non-square
        // count; the estimation path must not reject it.
        let mut collection = StrataCollection::default_partition();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for total in [1000, 1600, 10_000] {
            let area = collection
                .estimate_area(total, Strategy::Orthogonal, 100, &mut rng)
                .unwrap();
            assert!(
                area > 1.2 && area < 1.8,
                "estimate {} with total {} is far off 1.506",
                area,
                total
            );
        }
    }

    #[test]
    fn test_estimate_area_lands_near_the_reference_value() {
        let mut collection = StrataCollection::default_partition();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let area = collection
            .estimate_area(10_000, Strategy::Random, 100, &mut rng)
            .unwrap();
        assert!(area > 1.2 && area < 1.8, "estimate {} is far off 1.506", area);
    }
}
