use crate::controllers::cli::step_report::StepReport;

pub trait ReportPresenterPort {
    fn present(&self, report: &StepReport) -> std::io::Result<()>;
}
