mod config;
mod sources;

use std::path::Path;

use anyhow::Context;
use scout_engine::{consume, ConsoleReporter, Orchestrator};
use scout_logging::scout_info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load(Path::new(config::CONFIG_FILENAME))?;
    scout_logging::initialize(config.log_destination, config.log_level()?)
        .context("failed to install logger")?;

    let tasks = sources::default_tasks();
    sources::validate(&tasks).context("invalid source list")?;

    let orchestrator =
        Orchestrator::with_reqwest(config.fetch_settings(), config.orchestrator_settings());
    let streams = orchestrator.run(tasks);

    let mut reporter = ConsoleReporter::stdout();
    let summary = consume(streams, &mut reporter).await;
    scout_info!(
        "done: {} printed, {} duplicate(s) suppressed, {} source error(s)",
        summary.printed,
        summary.duplicates,
        summary.errors
    );
    Ok(())
}
