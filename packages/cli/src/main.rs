use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod settings;
mod views;

use app::App;
use settings::{Settings, CONFIG_FILE};
use views::Command;

/// StayKonnect from the terminal.
#[derive(Debug, Parser)]
#[command(name = "staykonnect", version, about)]
struct Cli {
    /// Settings file (TOML). Missing files are ignored.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = Settings::new(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;
    init_logging(&settings.log.filter);
    tracing::debug!(?settings, "settings loaded");

    let app = App::open(settings)?;
    views::run(&app, cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from([
            "staykonnect",
            "quote",
            "--rate",
            "100",
            "--start",
            "2024-03-01",
            "--end",
            "2024-03-04",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
        assert!(matches!(cli.command, Command::Quote(_)));
    }
}
