use std::num::NonZeroUsize;
use std::time::Duration;

use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::engine::errors::ConfigurationError;

pub const DEFAULT_RESOLUTION: usize = 512;
pub const DEFAULT_WORKER_COUNT: usize = 16;
pub const DEFAULT_MAX_ITERATIONS: u32 = 2000;

/// Largest grid side accepted; pixel coordinates are carried as `u32`.
pub const MAX_RESOLUTION: usize = 16_384;

/// The full set: `[-2, 1] x [-1.2, 1.8]`.
pub const DEFAULT_REGION: ComplexRect =
    ComplexRect::new_unchecked(Complex::new(-2.0, -1.2), Complex::new(1.0, 1.8));

/// Everything fixed when the engine is constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Side length of the square grid, in pixels.
    pub resolution: usize,
    pub worker_count: usize,
    /// Region shown at start-up and restored by a reset.
    pub region: ComplexRect,
    pub max_iterations: u32,
    /// Abandon a pass that runs longer than this. `None` waits indefinitely.
    pub pass_timeout: Option<Duration>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            worker_count: DEFAULT_WORKER_COUNT,
            region: DEFAULT_REGION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            pass_timeout: None,
        }
    }
}

impl EngineConfig {
    /// Checks the settings the type system cannot, returning the resolution.
    /// The worker count is checked when the pool is built.
    pub fn validate(&self) -> Result<NonZeroUsize, ConfigurationError> {
        let resolution =
            NonZeroUsize::new(self.resolution).ok_or(ConfigurationError::ZeroResolution)?;

        if self.resolution > MAX_RESOLUTION {
            return Err(ConfigurationError::ResolutionTooLarge {
                resolution: self.resolution,
                max: MAX_RESOLUTION,
            });
        }

        if self.max_iterations == 0 {
            return Err(ConfigurationError::ZeroMaxIterations);
        }

        Ok(resolution)
    }
}
