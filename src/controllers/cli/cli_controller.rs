use std::time::{Duration, Instant};

use crate::controllers::cli::navigation_step::NavigationStep;
use crate::controllers::cli::step_report::StepReport;
use crate::controllers::ports::report_presenter::ReportPresenterPort;
use crate::core::engine::engine_config::EngineConfig;
use crate::core::engine::errors::EngineError;
use crate::core::engine::mandelbrot_engine::MandelbrotEngine;

pub struct CliController<P: ReportPresenterPort> {
    engine: MandelbrotEngine,
    presenter: P,
    startup: Duration,
}

impl<P: ReportPresenterPort> CliController<P> {
    /// Builds the engine, which computes the initial view before returning.
    pub fn new(config: EngineConfig, presenter: P) -> Result<Self, EngineError> {
        let start = Instant::now();
        let engine = MandelbrotEngine::new(config)?;
        let startup = start.elapsed();

        Ok(Self {
            engine,
            presenter,
            startup,
        })
    }

    #[must_use]
    pub fn engine(&self) -> &MandelbrotEngine {
        &self.engine
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Presents the initial view, then applies `steps` in order. A step that
    /// fails is reported and skipped. Returns how many steps failed; going
    /// back with nothing to go back to is a no-op, not a failure.
    pub fn run(&mut self, steps: &[NavigationStep]) -> std::io::Result<usize> {
        self.presenter.present(&self.report(None, Ok(self.startup)))?;

        let mut failed = 0;

        for &step in steps {
            let report = self.apply(step);

            if !matches!(report.outcome, Ok(_) | Err(EngineError::EmptyHistory)) {
                failed += 1;
            }

            self.presenter.present(&report)?;
        }

        Ok(failed)
    }

    pub fn apply(&mut self, step: NavigationStep) -> StepReport {
        let outcome = match step {
            NavigationStep::Zoom { corner_a, corner_b } => {
                self.engine.zoom_to_pixels(corner_a, corner_b)
            }
            NavigationStep::Back => self.engine.go_back(),
            NavigationStep::Iterations(max_iterations) => {
                self.engine.set_max_iterations(max_iterations)
            }
            NavigationStep::Reset => self.engine.reset_view(),
            NavigationStep::Recompute => self.engine.recompute(),
        };

        match &outcome {
            Err(EngineError::EmptyHistory) => {
                tracing::debug!(%step, "nothing to go back to, view unchanged");
            }
            Err(err) => tracing::warn!(%step, %err, "step failed, view unchanged"),
            Ok(_) => {}
        }

        self.report(Some(step), outcome.map(|pass| pass.elapsed))
    }

    fn report(
        &self,
        step: Option<NavigationStep>,
        outcome: Result<Duration, EngineError>,
    ) -> StepReport {
        let viewport = self.engine.viewport();

        StepReport {
            step,
            region: viewport.region(),
            max_iterations: viewport.max_iterations(),
            history_depth: self.engine.history().len(),
            stats: self.engine.grid().stats(viewport.max_iterations()),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::point::Point;
    use std::cell::RefCell;
    use std::io;

    #[derive(Default)]
    struct RecordingPresenter {
        reports: RefCell<Vec<StepReport>>,
    }

    impl ReportPresenterPort for RecordingPresenter {
        fn present(&self, report: &StepReport) -> io::Result<()> {
            self.reports.borrow_mut().push(report.clone());
            Ok(())
        }
    }

    struct BrokenPipePresenter;

    impl ReportPresenterPort for BrokenPipePresenter {
        fn present(&self, _report: &StepReport) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
        }
    }

    fn config() -> EngineConfig {
        EngineConfig {
            resolution: 32,
            worker_count: 4,
            max_iterations: 100,
            ..EngineConfig::default()
        }
    }

    fn zoom(x1: u32, y1: u32, x2: u32, y2: u32) -> NavigationStep {
        NavigationStep::Zoom {
            corner_a: Point { x: x1, y: y1 },
            corner_b: Point { x: x2, y: y2 },
        }
    }

    #[test]
    fn test_run_without_steps_presents_initial_view() {
        let mut controller = CliController::new(config(), RecordingPresenter::default()).unwrap();

        assert_eq!(controller.run(&[]).unwrap(), 0);

        let reports = controller.presenter().reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].step, None);
        assert_eq!(reports[0].region, config().region);
        assert_eq!(reports[0].history_depth, 0);
        assert_eq!(reports[0].stats.interior + reports[0].stats.escaped, 32 * 32);
    }

    #[test]
    fn test_zoom_then_back_restores_region() {
        let mut controller = CliController::new(config(), RecordingPresenter::default()).unwrap();

        let failed = controller
            .run(&[zoom(8, 8, 24, 24), NavigationStep::Back])
            .unwrap();

        let reports = controller.presenter().reports.borrow();
        assert_eq!(failed, 0);
        assert_eq!(reports.len(), 3);
        assert_ne!(reports[1].region, reports[0].region);
        assert_eq!(reports[1].history_depth, 1);
        assert_eq!(reports[2].region, reports[0].region);
        assert_eq!(reports[2].history_depth, 0);
    }

    #[test]
    fn test_failed_steps_are_reported_and_skipped() {
        let mut controller = CliController::new(config(), RecordingPresenter::default()).unwrap();

        let failed = controller
            .run(&[NavigationStep::Back, zoom(5, 5, 5, 20), NavigationStep::Recompute])
            .unwrap();

        let reports = controller.presenter().reports.borrow();
        assert_eq!(failed, 1);
        assert_eq!(reports[1].outcome, Err(EngineError::EmptyHistory));
        assert!(matches!(reports[2].outcome, Err(EngineError::DegenerateRegion(_))));
        assert!(reports[3].is_success());
        assert_eq!(reports[3].region, config().region);
        assert_eq!(controller.engine().passes_completed(), 2);
    }

    #[test]
    fn test_back_with_empty_history_is_not_counted_as_failure() {
        let mut controller = CliController::new(config(), RecordingPresenter::default()).unwrap();

        let failed = controller
            .run(&[NavigationStep::Back, NavigationStep::Back])
            .unwrap();

        let reports = controller.presenter().reports.borrow();
        assert_eq!(failed, 0);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].outcome, Err(EngineError::EmptyHistory));
        assert_eq!(reports[2].region, config().region);
    }

    #[test]
    fn test_iterations_survive_back() {
        let mut controller = CliController::new(config(), RecordingPresenter::default()).unwrap();

        controller
            .run(&[
                zoom(0, 0, 16, 16),
                NavigationStep::Iterations(40),
                NavigationStep::Back,
            ])
            .unwrap();

        let reports = controller.presenter().reports.borrow();
        assert_eq!(reports[2].max_iterations, 40);
        assert_eq!(reports[3].max_iterations, 40);
        assert_eq!(reports[3].region, config().region);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut controller = CliController::new(config(), RecordingPresenter::default()).unwrap();

        let report = {
            controller.apply(zoom(0, 0, 16, 16));
            controller.apply(zoom(0, 0, 16, 16));
            controller.apply(NavigationStep::Reset)
        };

        assert!(report.is_success());
        assert_eq!(report.history_depth, 0);
        assert_eq!(report.region, config().region);
    }

    #[test]
    fn test_presenter_error_stops_run() {
        let mut controller = CliController::new(config(), BrokenPipePresenter).unwrap();

        let err = controller.run(&[NavigationStep::Recompute]).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(controller.engine().passes_completed(), 1);
    }
}
