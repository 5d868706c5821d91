//! Caller-facing error taxonomy.
//!
//! Only configuration mistakes are recoverable errors: an unknown sampling
//! method name, or a sample count that violates a strategy's structural
//! constraint. Internal-consistency defects (allocation totals that do not
//! add up, malformed partition tables) are programming errors and panic
//! instead; see [`crate::strata`].

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Orthogonal sampling requires a perfect-square sample count and never
    /// silently rounds.
    #[error("sample count {0} is not a perfect square")]
    InvalidSampleCount(usize),

    /// The sampling method name did not match any registered strategy.
    #[error("unknown sampling method: {0:?} (expected random, hypercube, or orthogonal)")]
    UnknownMethod(String),
}
