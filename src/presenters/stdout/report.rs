use std::io::Write;

use crate::controllers::cli::step_report::StepReport;
use crate::controllers::ports::report_presenter::ReportPresenterPort;

/// Writes one line per step report to standard output.
#[derive(Debug)]
pub struct StdoutPresenter {}

impl ReportPresenterPort for StdoutPresenter {
    fn present(&self, report: &StepReport) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();

        writeln!(stdout, "{}", format_report(report))?;
        stdout.flush()
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl StdoutPresenter {
    pub fn new() -> Self {
        Self {}
    }
}

pub fn format_report(report: &StepReport) -> String {
    let step = match &report.step {
        Some(step) => step.to_string(),
        None => "initial".to_string(),
    };

    let outcome = match &report.outcome {
        Ok(elapsed) => format!("ok in {:.2?}", elapsed),
        Err(err) => format!("unchanged: {}", err),
    };

    format!(
        "{:<20} {} | region {} | max_iterations {} | history {} | interior {} escaped {} | counts {}..={}",
        step,
        outcome,
        report.region,
        report.max_iterations,
        report.history_depth,
        report.stats.interior,
        report.stats.escaped,
        report.stats.min,
        report.stats.max,
    )
}
