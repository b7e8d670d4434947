use std::time::Duration;

use clap::Parser;

use crate::controllers::cli::navigation_step::NavigationStep;
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::engine::engine_config::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_RESOLUTION, DEFAULT_WORKER_COUNT, EngineConfig,
};
use crate::core::engine::errors::ConfigurationError;

/// Compute the Mandelbrot set over a square grid and replay a script of
/// navigation steps against it.
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct CliArgs {
    /// Grid side length in pixels
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    pub resolution: usize,

    /// Number of worker threads in the compute pool
    #[arg(long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,

    /// Iteration cap for every pass
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: u32,

    #[arg(long, default_value_t = -2.0, allow_negative_numbers = true)]
    pub min_real: f64,

    #[arg(long, default_value_t = -1.2, allow_negative_numbers = true)]
    pub min_imag: f64,

    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub max_real: f64,

    #[arg(long, default_value_t = 1.8, allow_negative_numbers = true)]
    pub max_imag: f64,

    /// Abandon any pass that takes longer than this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Steps to apply in order: zoom:X1,Y1,X2,Y2 | back | iterations:N | reset | recompute
    pub steps: Vec<NavigationStep>,
}

impl CliArgs {
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigurationError> {
        let region = ComplexRect::new(
            Complex::new(self.min_real, self.min_imag),
            Complex::new(self.max_real, self.max_imag),
        )?;

        let config = EngineConfig {
            resolution: self.resolution,
            worker_count: self.workers,
            region,
            max_iterations: self.max_iterations,
            pass_timeout: self.timeout_ms.map(Duration::from_millis),
        };

        config.validate()?;

        Ok(config)
    }
}
