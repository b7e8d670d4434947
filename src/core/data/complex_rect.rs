use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ComplexRectError {
    Degenerate { width: f64, height: f64 },
    NonFinite { min: Complex, max: Complex },
    Unbounded { width: f64, height: f64 },
}

impl fmt::Display for ComplexRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degenerate { width, height } => {
                write!(
                    f,
                    "complex rect size must be positive: {}x{}",
                    width, height
                )
            }
            Self::NonFinite { min, max } => {
                write!(
                    f,
                    "complex rect bounds must be finite: min ({}, {}) max ({}, {})",
                    min.real, min.imag, max.real, max.imag
                )
            }
            Self::Unbounded { width, height } => {
                write!(
                    f,
                    "complex rect size overflows: {}x{}",
                    width, height
                )
            }
        }
    }
}

impl Error for ComplexRectError {}

/// Axis-aligned rectangle of the complex plane with `min` as the lower-left
/// and `max` as the upper-right corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComplexRect {
    min: Complex,
    max: Complex,
}

impl ComplexRect {
    pub fn new(min: Complex, max: Complex) -> Result<Self, ComplexRectError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ComplexRectError::NonFinite { min, max });
        }

        let width = max.real - min.real;
        let height = max.imag - min.imag;

        // Finite corners far enough apart still give an infinite span.
        if !width.is_finite() || !height.is_finite() {
            return Err(ComplexRectError::Unbounded { width, height });
        }

        if width <= 0.0 || height <= 0.0 {
            return Err(ComplexRectError::Degenerate { width, height });
        }

        Ok(Self { min, max })
    }

    /// Skips validation. Only for bounds known to be valid at compile time.
    pub(crate) const fn new_unchecked(min: Complex, max: Complex) -> Self {
        Self { min, max }
    }

    /// Builds a rect from any two opposite corners, in either order.
    pub fn from_corners(a: Complex, b: Complex) -> Result<Self, ComplexRectError> {
        Self::new(
            Complex::new(a.real.min(b.real), a.imag.min(b.imag)),
            Complex::new(a.real.max(b.real), a.imag.max(b.imag)),
        )
    }

    #[must_use]
    pub fn min(&self) -> Complex {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Complex {
        self.max
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.real - self.min.real
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.imag - self.min.imag
    }

    #[must_use]
    pub fn contains_point(&self, point: Complex) -> bool {
        self.min.real <= point.real
            && self.min.imag <= point.imag
            && self.max.real >= point.real
            && self.max.imag >= point.imag
    }
}

impl fmt::Display for ComplexRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.min.real, self.max.real, self.min.imag, self.max.imag
        )
    }
}
