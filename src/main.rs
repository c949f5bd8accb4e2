//! fetch-cache - Local artifact cache for vendoring fetchers
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use fetch_cache::cli::{Cli, Commands};
use fetch_cache::config::ConfigManager;
use fetch_cache::error::FetchCacheResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> FetchCacheResult<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let mut config = config_manager.load().await?;

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("fetch_cache=warn"),
        1 => EnvFilter::new("fetch_cache=info"),
        _ => EnvFilter::new("fetch_cache=debug"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if config.general.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.without_time().init();
    }

    debug!("Using config file {}", config_manager.path().display());
    cli.overrides().apply(&mut config);

    // Dispatch to command
    match cli.command {
        Commands::Has(args) => {
            let hit = fetch_cache::cli::commands::has(args, &config)?;
            Ok(if hit {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Save(args) => fetch_cache::cli::commands::save(args, &config).map(success),
        Commands::Restore(args) => fetch_cache::cli::commands::restore(args, &config).map(success),
        Commands::Size(args) => fetch_cache::cli::commands::size(args).map(success),
        Commands::Inspect(args) => fetch_cache::cli::commands::inspect(args, &config).map(success),
        Commands::Config(args) => fetch_cache::cli::commands::config(args, &config, &config_manager)
            .await
            .map(success),
    }
}

fn success(_: ()) -> ExitCode {
    ExitCode::SUCCESS
}
