use crate::core::data::complex_rect::ComplexRect;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewportError {
    ZeroMaxIterations,
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterations => {
                write!(f, "Maximum iterations must be greater than zero")
            }
        }
    }
}

impl Error for ViewportError {}

/// The plane rectangle and iteration cap a single computation pass runs with.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    region: ComplexRect,
    max_iterations: u32,
}

impl Viewport {
    pub fn new(region: ComplexRect, max_iterations: u32) -> Result<Self, ViewportError> {
        if max_iterations == 0 {
            return Err(ViewportError::ZeroMaxIterations);
        }

        Ok(Self {
            region,
            max_iterations,
        })
    }

    #[must_use]
    pub fn region(&self) -> ComplexRect {
        self.region
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn with_region(self, region: ComplexRect) -> Self {
        Self { region, ..self }
    }

    pub fn with_max_iterations(self, max_iterations: u32) -> Result<Self, ViewportError> {
        Self::new(self.region, max_iterations)
    }
}
