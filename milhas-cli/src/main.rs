use anyhow::Context;
use clap::Parser;
use milhas_cli::{App, Cli};
use milhas_store::app_config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_with(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(dir) = cli.data_dir.clone() {
        config.storage.data_dir = Some(dir);
    }

    // Logs go to stderr; stdout carries command output only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut app = App::open(&config)?;
    let output = app.run(cli.command)?;
    println!("{}", output);
    Ok(())
}
