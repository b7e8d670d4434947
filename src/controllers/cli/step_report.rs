use std::time::Duration;

use crate::controllers::cli::navigation_step::NavigationStep;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::grid::GridStats;
use crate::core::engine::errors::EngineError;

/// What the engine looks like after one scripted step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// `None` for the pass that runs when the engine starts.
    pub step: Option<NavigationStep>,
    pub region: ComplexRect,
    pub max_iterations: u32,
    pub history_depth: usize,
    pub stats: GridStats,
    /// Pass duration, or why the step left the engine unchanged.
    pub outcome: Result<Duration, EngineError>,
}

impl StepReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
