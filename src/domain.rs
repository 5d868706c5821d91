//! Axis-aligned sampling rectangles in the complex plane.
//!
//! A [`Domain`] describes the region that points are drawn from. It is fixed
//! at configuration time and immutable afterwards; strata carry their own
//! `Domain` for their sub-region.

use num_complex::Complex64;

/// An axis-aligned rectangle `(x_min, x_max) × (y_min, y_max)` in the
/// complex plane, with the x-axis as the real part and the y-axis as the
/// imaginary part.
///
/// # Invariants
///
/// - `x_min < x_max` and `y_min < y_max`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Domain {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Domain {
    /// Creates a new rectangle.
    ///
    /// # Panics
    ///
    /// Panics if the bounds are empty or inverted.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        assert!(x_min < x_max, "Domain requires x_min < x_max");
        assert!(y_min < y_max, "Domain requires y_min < y_max");
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// The full rectangle `(-2, 1) × (-1, 1)` enclosing the whole set.
    pub fn full() -> Self {
        Self::new(-2.0, 1.0, -1.0, 1.0)
    }

    /// The `y >= 0` half `(-2, 1) × (0, 1)`.
    ///
    /// The set is mirror-symmetric about the real axis, so an estimate over
    /// this half doubles to an estimate over the full set.
    pub fn upper_half() -> Self {
        Self::new(-2.0, 1.0, 0.0, 1.0)
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }
    pub fn x_max(&self) -> f64 {
        self.x_max
    }
    pub fn y_min(&self) -> f64 {
        self.y_min
    }
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Extent along the real axis.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Checks whether a point lies within the rectangle, bounds inclusive.
    pub fn contains(&self, p: Complex64) -> bool {
        p.re >= self.x_min && p.re <= self.x_max && p.im >= self.y_min && p.im <= self.y_max
    }
}
