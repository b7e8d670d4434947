use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::core::actions::cancellation::{CancelToken, NeverCancel};
use crate::core::actions::compute_pass::worker_pool::{PassReport, WorkerPool};
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::grid::Grid;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::engine::engine_config::EngineConfig;
use crate::core::engine::errors::{ConfigurationError, EngineError};
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::navigation::history::{HistoryFrame, NavigationHistory};
use crate::core::util::pixel_to_complex_coords::pixel_corner_to_complex_coords;

/// Owns the current viewport, the computed grid and the navigation history.
///
/// Every operation that changes what is on screen runs one full pass and
/// returns only after it completes. Passes write into a back buffer that is
/// swapped in on success, so [`grid`](Self::grid) always shows a complete
/// pass for [`viewport`](Self::viewport), and a failed pass changes nothing.
#[derive(Debug)]
pub struct MandelbrotEngine {
    config: EngineConfig,
    resolution: NonZeroUsize,
    viewport: Viewport,
    grid: Grid,
    back_buffer: Grid,
    history: NavigationHistory,
    pool: WorkerPool,
    passes_completed: u64,
}

impl MandelbrotEngine {
    /// Validates `config`, starts the worker pool and computes the initial
    /// view.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let resolution = config.validate()?;
        let viewport = Viewport::new(config.region, config.max_iterations)
            .map_err(|_| ConfigurationError::ZeroMaxIterations)?;
        let pool = WorkerPool::new(config.worker_count).map_err(ConfigurationError::from)?;

        let mut engine = Self {
            config,
            resolution,
            viewport,
            grid: Grid::new(resolution),
            back_buffer: Grid::new(resolution),
            history: NavigationHistory::new(),
            pool,
            passes_completed: 0,
        };

        engine.recompute()?;

        Ok(engine)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    #[must_use]
    pub fn passes_completed(&self) -> u64 {
        self.passes_completed
    }

    pub fn set_pass_timeout(&mut self, pass_timeout: Option<Duration>) {
        self.config.pass_timeout = pass_timeout;
    }

    pub fn recompute(&mut self) -> Result<PassReport, EngineError> {
        self.recompute_cancelable(&NeverCancel)
    }

    pub fn recompute_cancelable<C: CancelToken>(
        &mut self,
        cancel: &C,
    ) -> Result<PassReport, EngineError> {
        self.run_pass(self.viewport, cancel)
    }

    /// Zooms into the rectangle spanned by two opposite corners, remembering
    /// the current region so [`go_back`](Self::go_back) can return to it.
    pub fn zoom_to(
        &mut self,
        corner_a: Complex,
        corner_b: Complex,
    ) -> Result<PassReport, EngineError> {
        self.zoom_to_cancelable(corner_a, corner_b, &NeverCancel)
    }

    pub fn zoom_to_cancelable<C: CancelToken>(
        &mut self,
        corner_a: Complex,
        corner_b: Complex,
        cancel: &C,
    ) -> Result<PassReport, EngineError> {
        let region =
            ComplexRect::from_corners(corner_a, corner_b).map_err(EngineError::DegenerateRegion)?;
        let previous = HistoryFrame::new(self.viewport.region());

        let report = self.run_pass(self.viewport.with_region(region), cancel)?;
        self.history.push(previous);

        tracing::debug!(depth = self.history.len(), region = %region, "zoomed in");

        Ok(report)
    }

    /// Zooms into a selection given as two opposite pixel corners of the
    /// current grid. Corners may lie on the far edge (`== resolution`).
    pub fn zoom_to_pixels(
        &mut self,
        corner_a: Point,
        corner_b: Point,
    ) -> Result<PassReport, EngineError> {
        self.zoom_to_pixels_cancelable(corner_a, corner_b, &NeverCancel)
    }

    pub fn zoom_to_pixels_cancelable<C: CancelToken>(
        &mut self,
        corner_a: Point,
        corner_b: Point,
        cancel: &C,
    ) -> Result<PassReport, EngineError> {
        let region = self.viewport.region();
        let resolution = self.resolution.get();

        let plane_a = pixel_corner_to_complex_coords(corner_a, region, resolution)?;
        let plane_b = pixel_corner_to_complex_coords(corner_b, region, resolution)?;

        self.zoom_to_cancelable(plane_a, plane_b, cancel)
    }

    /// Restores the most recently pushed region. With an empty history this
    /// returns [`EngineError::EmptyHistory`] and changes nothing.
    pub fn go_back(&mut self) -> Result<PassReport, EngineError> {
        self.go_back_cancelable(&NeverCancel)
    }

    pub fn go_back_cancelable<C: CancelToken>(
        &mut self,
        cancel: &C,
    ) -> Result<PassReport, EngineError> {
        let Some(frame) = self.history.peek().copied() else {
            tracing::debug!("back requested with empty history");
            return Err(EngineError::EmptyHistory);
        };

        let report = self.run_pass(self.viewport.with_region(frame.region()), cancel)?;
        self.history.pop();

        tracing::debug!(depth = self.history.len(), region = %frame.region(), "went back");

        Ok(report)
    }

    /// Changes the iteration cap for this and all later passes. History
    /// frames carry no cap, so going back keeps the new one.
    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<PassReport, EngineError> {
        self.set_max_iterations_cancelable(max_iterations, &NeverCancel)
    }

    pub fn set_max_iterations_cancelable<C: CancelToken>(
        &mut self,
        max_iterations: u32,
        cancel: &C,
    ) -> Result<PassReport, EngineError> {
        let viewport = self.viewport.with_max_iterations(max_iterations)?;

        self.run_pass(viewport, cancel)
    }

    /// Returns to the configured start-up region and forgets the history.
    pub fn reset_view(&mut self) -> Result<PassReport, EngineError> {
        self.reset_view_cancelable(&NeverCancel)
    }

    pub fn reset_view_cancelable<C: CancelToken>(
        &mut self,
        cancel: &C,
    ) -> Result<PassReport, EngineError> {
        let report = self.run_pass(self.viewport.with_region(self.config.region), cancel)?;
        self.history.clear();

        Ok(report)
    }

    fn run_pass<C: CancelToken>(
        &mut self,
        viewport: Viewport,
        cancel: &C,
    ) -> Result<PassReport, EngineError> {
        let span = tracing::info_span!("compute_pass", pass = self.passes_completed + 1);
        let _guard = span.enter();

        let algorithm = MandelbrotAlgorithm::new(&viewport, self.resolution.get());
        let deadline = self.config.pass_timeout.map(|timeout| Instant::now() + timeout);

        let report = self
            .pool
            .compute_all(&algorithm, &mut self.back_buffer, cancel, deadline)
            .inspect_err(|err| tracing::warn!(%err, "pass abandoned, keeping previous grid"))?;

        std::mem::swap(&mut self.grid, &mut self.back_buffer);
        self.viewport = viewport;
        self.passes_completed += 1;

        tracing::info!(
            region = %viewport.region(),
            max_iterations = viewport.max_iterations(),
            workers = report.worker_count,
            elapsed = ?report.elapsed,
            "pass complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::CancelFlag;
    use crate::core::actions::compute_pass::worker_pool::{ComputePassError, WorkerPoolError};
    use crate::core::data::complex_rect::ComplexRectError;
    use crate::core::data::viewport::ViewportError;
    use crate::core::fractals::mandelbrot::algorithm::escape_time;
    use crate::core::util::pixel_to_complex_coords::{
        PixelToComplexCoordsError, pixel_to_complex_coords,
    };

    fn small_config() -> EngineConfig {
        EngineConfig {
            resolution: 48,
            worker_count: 4,
            max_iterations: 200,
            ..EngineConfig::default()
        }
    }

    fn scenario_config() -> EngineConfig {
        EngineConfig {
            resolution: 4,
            worker_count: 2,
            max_iterations: 10,
            region: ComplexRect::new(Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0)).unwrap(),
            pass_timeout: None,
        }
    }

    #[test]
    fn test_new_runs_initial_pass() {
        let engine = MandelbrotEngine::new(small_config()).unwrap();

        assert_eq!(engine.passes_completed(), 1);
        assert_eq!(engine.grid().resolution(), 48);
        assert_eq!(engine.viewport().region(), small_config().region);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_zero_workers_prevents_startup() {
        let config = EngineConfig {
            worker_count: 0,
            ..small_config()
        };

        assert_eq!(
            MandelbrotEngine::new(config).unwrap_err(),
            EngineError::Configuration(ConfigurationError::WorkerPool(WorkerPoolError::ZeroWorkers))
        );
    }

    #[test]
    fn test_zero_resolution_prevents_startup() {
        let config = EngineConfig {
            resolution: 0,
            ..small_config()
        };

        assert_eq!(
            MandelbrotEngine::new(config).unwrap_err(),
            EngineError::Configuration(ConfigurationError::ZeroResolution)
        );
    }

    #[test]
    fn test_scenario_cell_matches_hand_trace() {
        let engine = MandelbrotEngine::new(scenario_config()).unwrap();
        let region = engine.viewport().region();

        let c = pixel_to_complex_coords(Point { x: 0, y: 0 }, region, 4);
        assert_eq!(c, Complex::new(-1.0, 1.0));

        // z0 = -1+i, z1 = -1-i, z2 = -1+3i and |z2|² = 10 > 4
        assert_eq!(engine.grid().get(Point { x: 0, y: 0 }), Some(2));
        assert_eq!(escape_time(c, 10), 2);
    }

    #[test]
    fn test_origin_pixel_saturates() {
        let engine = MandelbrotEngine::new(scenario_config()).unwrap();

        // pixel (2, 2) maps to 0 + 0i
        assert_eq!(engine.grid().get(Point { x: 2, y: 2 }), Some(10));
    }

    #[test]
    fn test_every_cell_matches_serial_evaluation() {
        let engine = MandelbrotEngine::new(small_config()).unwrap();
        let region = engine.viewport().region();

        for y in 0..48 {
            for x in 0..48 {
                let pixel = Point { x, y };
                let expected = escape_time(pixel_to_complex_coords(pixel, region, 48), 200);

                assert_eq!(engine.grid().get(pixel), Some(expected));
            }
        }
    }

    #[test]
    fn test_cells_stay_within_cap() {
        let engine = MandelbrotEngine::new(small_config()).unwrap();

        assert!(engine.grid().cells().iter().all(|&count| count <= 200));
        assert!(engine.grid().stats(200).interior > 0);
        assert!(engine.grid().stats(200).escaped > 0);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();
        let first = engine.grid().clone();

        engine.recompute().unwrap();

        assert_eq!(engine.grid(), &first);
        assert_eq!(engine.passes_completed(), 2);
    }

    #[test]
    fn test_worker_count_does_not_change_result() {
        let reference = MandelbrotEngine::new(small_config()).unwrap();

        for worker_count in [1, 3, 7, 64] {
            let engine = MandelbrotEngine::new(EngineConfig {
                worker_count,
                ..small_config()
            })
            .unwrap();

            assert_eq!(engine.grid(), reference.grid(), "{} workers", worker_count);
        }
    }

    #[test]
    fn test_zoom_then_back_round_trips() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();
        let before_viewport = *engine.viewport();
        let before_grid = engine.grid().clone();

        engine
            .zoom_to(Complex::new(-0.8, 0.0), Complex::new(-0.6, 0.2))
            .unwrap();

        assert_eq!(engine.history().len(), 1);
        assert_ne!(engine.viewport(), &before_viewport);
        assert_ne!(engine.grid(), &before_grid);

        engine.go_back().unwrap();

        assert_eq!(engine.viewport(), &before_viewport);
        assert_eq!(engine.grid(), &before_grid);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_zoom_accepts_corners_in_any_order() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();

        engine
            .zoom_to(Complex::new(-0.6, 0.0), Complex::new(-0.8, 0.2))
            .unwrap();

        assert_eq!(
            engine.viewport().region(),
            ComplexRect::new(Complex::new(-0.8, 0.0), Complex::new(-0.6, 0.2)).unwrap()
        );
    }

    #[test]
    fn test_nested_zooms_unwind_in_reverse_order() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();
        let home = engine.viewport().region();

        engine.zoom_to(Complex::new(-1.0, -0.5), Complex::new(0.0, 0.5)).unwrap();
        let first_zoom = engine.viewport().region();
        engine.zoom_to(Complex::new(-0.5, 0.0), Complex::new(-0.25, 0.25)).unwrap();

        assert_eq!(engine.history().len(), 2);

        engine.go_back().unwrap();
        assert_eq!(engine.viewport().region(), first_zoom);

        engine.go_back().unwrap();
        assert_eq!(engine.viewport().region(), home);
    }

    #[test]
    fn test_degenerate_zoom_changes_nothing() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();
        let viewport = *engine.viewport();
        let grid = engine.grid().clone();
        let p = Complex::new(-0.5, 0.25);

        let result = engine.zoom_to(p, p);

        assert_eq!(
            result,
            Err(EngineError::DegenerateRegion(ComplexRectError::Degenerate {
                width: 0.0,
                height: 0.0
            }))
        );
        assert_eq!(engine.viewport(), &viewport);
        assert_eq!(engine.grid(), &grid);
        assert!(engine.history().is_empty());
        assert_eq!(engine.passes_completed(), 1);
    }

    #[test]
    fn test_back_with_empty_history_changes_nothing() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();
        let viewport = *engine.viewport();

        assert_eq!(engine.go_back(), Err(EngineError::EmptyHistory));
        assert_eq!(engine.viewport(), &viewport);
        assert_eq!(engine.passes_completed(), 1);
    }

    #[test]
    fn test_zoom_to_pixels_maps_corners_through_viewport() {
        let mut engine = MandelbrotEngine::new(scenario_config()).unwrap();

        engine
            .zoom_to_pixels(Point { x: 2, y: 2 }, Point { x: 0, y: 0 })
            .unwrap();

        assert_eq!(
            engine.viewport().region(),
            ComplexRect::new(Complex::new(-1.0, 0.0), Complex::new(0.0, 1.0)).unwrap()
        );
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_zoom_to_pixels_reaches_far_edge() {
        let mut engine = MandelbrotEngine::new(scenario_config()).unwrap();

        engine
            .zoom_to_pixels(Point { x: 2, y: 2 }, Point { x: 4, y: 4 })
            .unwrap();

        assert_eq!(
            engine.viewport().region(),
            ComplexRect::new(Complex::new(0.0, -1.0), Complex::new(1.0, 0.0)).unwrap()
        );
    }

    #[test]
    fn test_zoom_to_pixels_outside_grid_rejected() {
        let mut engine = MandelbrotEngine::new(scenario_config()).unwrap();
        let corner = Point { x: 5, y: 1 };

        assert_eq!(
            engine.zoom_to_pixels(Point { x: 0, y: 0 }, corner),
            Err(EngineError::Pixel(PixelToComplexCoordsError::PointOutsideGrid {
                point: corner,
                resolution: 4
            }))
        );
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_zoom_to_single_pixel_rejected_as_degenerate() {
        let mut engine = MandelbrotEngine::new(scenario_config()).unwrap();

        let result = engine.zoom_to_pixels(Point { x: 1, y: 1 }, Point { x: 1, y: 1 });

        assert!(matches!(result, Err(EngineError::DegenerateRegion(_))));
    }

    #[test]
    fn test_cancelled_zoom_changes_nothing() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();
        let viewport = *engine.viewport();
        let grid = engine.grid().clone();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result =
            engine.zoom_to_cancelable(Complex::new(-1.0, -1.0), Complex::new(0.0, 0.0), &cancel);

        assert_eq!(result, Err(EngineError::Pass(ComputePassError::Cancelled)));
        assert_eq!(engine.viewport(), &viewport);
        assert_eq!(engine.grid(), &grid);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_cancelled_back_keeps_history_frame() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();
        engine.zoom_to(Complex::new(-1.0, -1.0), Complex::new(0.0, 0.0)).unwrap();
        let zoomed = *engine.viewport();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result = engine.go_back_cancelable(&cancel);

        assert_eq!(result, Err(EngineError::Pass(ComputePassError::Cancelled)));
        assert_eq!(engine.viewport(), &zoomed);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_cancelled_pixel_zoom_changes_nothing() {
        let mut engine = MandelbrotEngine::new(scenario_config()).unwrap();
        let viewport = *engine.viewport();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result =
            engine.zoom_to_pixels_cancelable(Point { x: 0, y: 0 }, Point { x: 2, y: 2 }, &cancel);

        assert_eq!(result, Err(EngineError::Pass(ComputePassError::Cancelled)));
        assert_eq!(engine.viewport(), &viewport);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_cancelled_iteration_change_keeps_old_cap() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();
        let grid = engine.grid().clone();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result = engine.set_max_iterations_cancelable(50_000, &cancel);

        assert_eq!(result, Err(EngineError::Pass(ComputePassError::Cancelled)));
        assert_eq!(engine.viewport().max_iterations(), 200);
        assert_eq!(engine.grid(), &grid);
        assert_eq!(engine.passes_completed(), 1);
    }

    #[test]
    fn test_cancelled_reset_keeps_history() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();
        engine.zoom_to(Complex::new(-1.0, -0.5), Complex::new(0.0, 0.5)).unwrap();
        let zoomed = *engine.viewport();
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result = engine.reset_view_cancelable(&cancel);

        assert_eq!(result, Err(EngineError::Pass(ComputePassError::Cancelled)));
        assert_eq!(engine.viewport(), &zoomed);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_timed_out_pass_keeps_previous_grid() {
        // Entirely inside the main cardioid, so every cell runs to the cap.
        let interior = ComplexRect::new(Complex::new(-0.2, -0.2), Complex::new(0.2, 0.2)).unwrap();
        let mut engine = MandelbrotEngine::new(EngineConfig {
            resolution: 128,
            worker_count: 2,
            max_iterations: 1,
            region: interior,
            pass_timeout: None,
        })
        .unwrap();
        let grid = engine.grid().clone();
        engine.set_pass_timeout(Some(Duration::ZERO));

        let result = engine.set_max_iterations(50_000);

        assert!(matches!(
            result,
            Err(EngineError::Pass(ComputePassError::TimedOut { .. }))
        ));
        assert_eq!(engine.viewport().max_iterations(), 1);
        assert_eq!(engine.grid(), &grid);
    }

    #[test]
    fn test_set_max_iterations_recomputes_and_keeps_history() {
        let mut engine = MandelbrotEngine::new(scenario_config()).unwrap();
        engine.zoom_to(Complex::new(-0.5, -0.5), Complex::new(0.5, 0.5)).unwrap();

        engine.set_max_iterations(25).unwrap();

        assert_eq!(engine.viewport().max_iterations(), 25);
        assert_eq!(engine.grid().stats(25).max, 25);
        assert_eq!(engine.history().len(), 1);

        engine.go_back().unwrap();
        assert_eq!(engine.viewport().max_iterations(), 25);
    }

    #[test]
    fn test_set_max_iterations_zero_rejected() {
        let mut engine = MandelbrotEngine::new(scenario_config()).unwrap();

        assert_eq!(
            engine.set_max_iterations(0),
            Err(EngineError::InvalidViewport(ViewportError::ZeroMaxIterations))
        );
        assert_eq!(engine.viewport().max_iterations(), 10);
    }

    #[test]
    fn test_reset_view_restores_home_and_clears_history() {
        let mut engine = MandelbrotEngine::new(small_config()).unwrap();
        let home_grid = engine.grid().clone();
        engine.zoom_to(Complex::new(-1.0, -0.5), Complex::new(0.0, 0.5)).unwrap();
        engine.zoom_to(Complex::new(-0.5, 0.0), Complex::new(-0.25, 0.25)).unwrap();

        engine.reset_view().unwrap();

        assert_eq!(engine.viewport().region(), small_config().region);
        assert_eq!(engine.grid(), &home_grid);
        assert!(engine.history().is_empty());
    }
}
