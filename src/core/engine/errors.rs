use std::error::Error;
use std::fmt;

use crate::core::actions::compute_pass::worker_pool::{ComputePassError, WorkerPoolError};
use crate::core::data::complex_rect::ComplexRectError;
use crate::core::data::viewport::ViewportError;
use crate::core::util::pixel_to_complex_coords::PixelToComplexCoordsError;

/// Settings that prevent the engine from starting.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    ZeroResolution,
    ResolutionTooLarge { resolution: usize, max: usize },
    ZeroMaxIterations,
    InvalidRegion(ComplexRectError),
    WorkerPool(WorkerPoolError),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroResolution => write!(f, "grid resolution must be greater than zero"),
            Self::ResolutionTooLarge { resolution, max } => {
                write!(f, "grid resolution {} exceeds the maximum of {}", resolution, max)
            }
            Self::ZeroMaxIterations => write!(f, "Maximum iterations must be greater than zero"),
            Self::InvalidRegion(err) => write!(f, "invalid initial region: {}", err),
            Self::WorkerPool(err) => write!(f, "worker pool error: {}", err),
        }
    }
}

impl Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRegion(err) => Some(err),
            Self::WorkerPool(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WorkerPoolError> for ConfigurationError {
    fn from(err: WorkerPoolError) -> Self {
        Self::WorkerPool(err)
    }
}

impl From<ComplexRectError> for ConfigurationError {
    fn from(err: ComplexRectError) -> Self {
        Self::InvalidRegion(err)
    }
}

/// Failures of engine operations. Apart from `Configuration`, every variant
/// is recoverable: the engine's viewport, history and grid are untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Configuration(ConfigurationError),
    DegenerateRegion(ComplexRectError),
    EmptyHistory,
    Pixel(PixelToComplexCoordsError),
    InvalidViewport(ViewportError),
    Pass(ComputePassError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "configuration error: {}", err),
            Self::DegenerateRegion(err) => write!(f, "zoom rejected: {}", err),
            Self::EmptyHistory => write!(f, "no previous view to go back to"),
            Self::Pixel(err) => write!(f, "zoom rejected: {}", err),
            Self::InvalidViewport(err) => write!(f, "viewport rejected: {}", err),
            Self::Pass(err) => write!(f, "{}", err),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::DegenerateRegion(err) => Some(err),
            Self::EmptyHistory => None,
            Self::Pixel(err) => Some(err),
            Self::InvalidViewport(err) => Some(err),
            Self::Pass(err) => Some(err),
        }
    }
}

impl From<ConfigurationError> for EngineError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<PixelToComplexCoordsError> for EngineError {
    fn from(err: PixelToComplexCoordsError) -> Self {
        Self::Pixel(err)
    }
}

impl From<ViewportError> for EngineError {
    fn from(err: ViewportError) -> Self {
        Self::InvalidViewport(err)
    }
}

impl From<ComputePassError> for EngineError {
    fn from(err: ComputePassError) -> Self {
        Self::Pass(err)
    }
}
