//! # mandel-rs: Monte Carlo estimation of the Mandelbrot set area
//!
//! **`mandel-rs`** estimates the area of the Mandelbrot set by Monte Carlo
//! integration, comparing point-sampling strategies with different
//! statistical guarantees and a stratified variance-reduction scheme.
//!
//! ## How the estimate works
//!
//! A point `c` belongs to the set iff the orbit of `z ← z² + c` stays
//! bounded; a bounded escape-time test decides membership under a fixed
//! iteration budget. Scatter points over a rectangle enclosing the set and
//! the hit ratio times the rectangle area approximates the set's area
//! (reference value ≈ 1.506).
//!
//! ## Key Features
//!
//! - **Three sampling strategies**: independent uniform, Latin hypercube,
//!   and orthogonal (Latin-square) sampling, interchangeable behind
//!   [`Strategy`][crate::sampling::Strategy] so the estimator and the
//!   allocator stay strategy-agnostic.
//! - **Stratified estimation**: a weighted partition of the `y ≥ 0` half
//!   of the domain ([`StrataCollection`][crate::strata::StrataCollection])
//!   splits the sample budget by importance and doubles the recombined
//!   estimate through the set's mirror symmetry.
//! - **Reproducible runs**: every sampling operation is generic over
//!   [`rand::Rng`], so a seeded generator replays a run exactly.
//! - **Round-level output**: runs return the raw per-round estimates for
//!   variance, confidence-interval, and convergence analysis ([`stats`]).
//!
//! ## Basic Usage
//!
//! ```rust
//! use mandel_rs::domain::Domain;
//! use mandel_rs::estimator::Estimator;
//! use mandel_rs::sampling::Strategy;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! // 2000 samples per round, 50 escape-time iterations, 5 rounds.
//! let estimator = Estimator::new(Domain::full(), Strategy::Hypercube, 2000, 50);
//! let result = estimator.run(5, false, &mut rng).unwrap();
//!
//! assert_eq!(result.areas.len(), 5);
//! assert!(result.mean > 1.2 && result.mean < 1.9);
//! ```
//!
//! ## Core Components
//!
//! - **[`escape`]**: the bounded escape-time membership oracle.
//! - **[`sampling`]**: the three point-generation strategies.
//! - **[`strata`]**: weighted spatial stratification and budget allocation.
//! - **[`estimator`]**: the round-based simulation driver.
//! - **[`stats`]**: summary statistics and convergence traces.
//! - **[`export`]**, **[`render`]**: the collaborator layers for CSV
//!   output and pixel escape-time rasterization.

pub mod domain;
pub mod error;
pub mod escape;
pub mod estimator;
pub mod export;
pub mod render;
pub mod sampling;
pub mod stats;
pub mod strata;
