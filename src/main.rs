use clap::Parser;
use mbset_navigator::{CliArgs, CliController, StdoutPresenter};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = args.engine_config()?;

    tracing::info!(
        resolution = config.resolution,
        workers = config.worker_count,
        max_iterations = config.max_iterations,
        "starting engine"
    );

    let mut controller = CliController::new(config, StdoutPresenter::new())?;
    let failed = controller.run(&args.steps)?;

    if failed > 0 {
        tracing::info!(failed, "some steps left the view unchanged");
    }

    Ok(())
}
