//! pagescout - terminal client for page extraction backends
//!
//! Run without arguments to launch the TUI, or use subcommands for CLI mode.
//!
//! Available as the `pscout` command.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagescout::api::client::HttpBackend;
use pagescout::cli::commands::{Cli, Commands};
use pagescout::cli::{actions, config as config_cli};
use pagescout::core::config::Config;
use pagescout::error::Result;
use pagescout::tui::App;

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.server.as_deref())?;

    match cli.command {
        // No subcommand - launch TUI mode
        None => run_tui(config).await,

        Some(Commands::Fetch { url, json }) => actions::handle_fetch(&config, &url, json).await,
        Some(Commands::Autopilot { url, json }) => {
            actions::handle_autopilot(&config, &url, json).await
        }
        Some(Commands::Summarize { file, json }) => {
            actions::handle_summarize(&config, file.as_deref(), json).await
        }
        Some(Commands::Config(args)) => config_cli::handle_config(args.command),
    }
}

/// Load config, applying the --server / PAGESCOUT_SERVER override
fn load_config(server_override: Option<&str>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(server) = server_override {
        config.server_url = server.to_string();
    }
    Ok(config)
}

/// Run the TUI application
async fn run_tui(config: Config) -> Result<()> {
    let backend = Arc::new(HttpBackend::new(&config)?);
    let mut app = App::new(backend, &config);
    app.run().await
}
