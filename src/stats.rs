//! Summary statistics over per-round area estimates.
//!
//! Provides the sample moments, the normal-approximation confidence
//! interval for the mean, and the cumulative-mean convergence trace that
//! downstream plotting consumes.

use statrs::distribution::{ContinuousCDF, Normal};

/// Basic statistics computed from a sample.
#[derive(Debug, Clone)]
pub struct Statistics {
    /// Sample size
    pub n: usize,
    /// Sample mean
    pub mean: f64,
    /// Sample variance (unbiased, using n-1)
    pub variance: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Standard error of the mean
    pub std_error: f64,
}

impl Statistics {
    /// Compute statistics from a sample.
    ///
    /// # Panics
    ///
    /// Panics on an empty sample.
    pub fn from_sample(sample: &[f64]) -> Self {
        assert!(!sample.is_empty(), "Cannot compute statistics from empty sample");

        let n = sample.len();
        let mean = sample.iter().sum::<f64>() / n as f64;

        let variance = if n > 1 {
            sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        let std_dev = variance.sqrt();
        let std_error = std_dev / (n as f64).sqrt();

        Self {
            n,
            mean,
            variance,
            std_dev,
            std_error,
        }
    }
}

/// A confidence interval for the mean.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence: f64,
}

impl ConfidenceInterval {
    pub fn new(lower: f64, upper: f64, confidence: f64) -> Self {
        Self {
            lower,
            upper,
            confidence,
        }
    }

    /// Interval width
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Half of the interval width; at 95% confidence this is the familiar
    /// `1.96 · std / √n`.
    pub fn half_width(&self) -> f64 {
        self.width() / 2.0
    }

    /// Check if a value is within the interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl std::fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.4}, {:.4}] ({:.0}% CI)",
            self.lower,
            self.upper,
            self.confidence * 100.0
        )
    }
}

/// Compute a confidence interval for the mean using the Central Limit
/// Theorem.
///
/// Assumes the sample size is large enough (typically n ≥ 30) for the
/// normal approximation to be valid.
pub fn clt_confidence_interval(stats: &Statistics, confidence: f64) -> ConfidenceInterval {
    let alpha = 1.0 - confidence;
    let z = Normal::new(0.0, 1.0).unwrap().inverse_cdf(1.0 - alpha / 2.0);

    let margin = z * stats.std_error;
    ConfidenceInterval::new(stats.mean - margin, stats.mean + margin, confidence)
}

/// The running mean after each round: element `i` is the mean of
/// `sample[..=i]`. This is the convergence trace the original report plots
/// against the round index.
pub fn cumulative_mean(sample: &[f64]) -> Vec<f64> {
    let mut sum = 0.0;
    sample
        .iter()
        .enumerate()
        .map(|(i, x)| {
            sum += x;
            sum / (i + 1) as f64
        })
        .collect()
}
