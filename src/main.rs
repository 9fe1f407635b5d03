use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quakewatch::app::AppContext;
use quakewatch::cli::{commands, Cli, Commands};
use quakewatch::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stderr keeps stdout clean for `list --json`
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };
    let mut config = Config::load_from(&config_path)?;
    cli.apply_overrides(&mut config);

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::List { json } => {
            commands::list_quakes(&ctx, json).await?;
        }
        Commands::Open { index } => {
            commands::open_quake(&ctx, index).await?;
        }
        Commands::Tui => {
            quakewatch::tui::run(Arc::new(ctx)).await?;
        }
        Commands::Config => {
            commands::show_config(&ctx, &config_path)?;
        }
    }

    Ok(())
}
