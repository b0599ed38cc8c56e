//! adk CLI binary entry point.

use adk::cli::demos::{agent_line, build_demo, run_demo};
use adk::cli::{init_tracing, Cli};
use adk::config::AdkConfig;
use adk::error::AdkError;

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse_args();

    if let Err(e) = run(cli).await {
        eprintln!("Error [{}]: {e}", e.category().label());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AdkError> {
    let mut config = AdkConfig::from_env();
    if let Some(project) = cli.project {
        config = config.with_project(project);
    }
    if let Some(location) = cli.location {
        config = config.with_location(location);
    }

    let model = adk::provider::create_provider(&cli.model, &config)?;
    let spec = build_demo(cli.demo, model);

    println!("{}", spec.user_line());
    let events = run_demo(&spec).await?;
    println!("{}", agent_line(&events)?);
    Ok(())
}
