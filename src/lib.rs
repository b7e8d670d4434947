mod controllers;
mod core;
mod presenters;

pub use controllers::cli::args::CliArgs;
pub use controllers::cli::cli_controller::CliController;
pub use controllers::cli::navigation_step::{NavigationStep, NavigationStepParseError};
pub use controllers::cli::step_report::StepReport;
pub use controllers::ports::report_presenter::ReportPresenterPort;
pub use crate::core::actions::cancellation::{CancelFlag, CancelToken, NeverCancel};
pub use crate::core::actions::compute_pass::completion_latch::{
    CompletionLatch, CountDownOnDrop, LatchWaitError,
};
pub use crate::core::actions::compute_pass::ports::fractal_algorithm::FractalAlgorithm;
pub use crate::core::actions::compute_pass::worker_pool::{
    ComputePassError, PassReport, WorkerPool, WorkerPoolError,
};
pub use crate::core::data::complex::Complex;
pub use crate::core::data::complex_rect::{ComplexRect, ComplexRectError};
pub use crate::core::data::grid::{Grid, GridError, GridStats};
pub use crate::core::data::point::Point;
pub use crate::core::data::viewport::{Viewport, ViewportError};
pub use crate::core::engine::engine_config::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_REGION, DEFAULT_RESOLUTION, DEFAULT_WORKER_COUNT, EngineConfig,
    MAX_RESOLUTION,
};
pub use crate::core::engine::errors::{ConfigurationError, EngineError};
pub use crate::core::engine::mandelbrot_engine::MandelbrotEngine;
pub use crate::core::fractals::mandelbrot::algorithm::{MandelbrotAlgorithm, escape_time};
pub use crate::core::navigation::history::{HistoryFrame, NavigationHistory};
pub use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, pixel_corner_to_complex_coords, pixel_to_complex_coords,
};
pub use crate::core::util::strided_rows::{partition_rows_mut, strided_rows};
pub use presenters::stdout::report::{StdoutPresenter, format_report};
