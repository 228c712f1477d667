//! Taraang admin entry point.

use clap::Parser;
use tracing::info;

use taraang_admin::cli::{self, Cli, Command};
use taraang_admin::state::{default_config_file, AdminConfig, AppState, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    taraang_admin::init_tracing();

    let config_file = cli.config.clone().or_else(default_config_file);
    let config = AdminConfig::load_from(config_file.as_deref())?;
    info!(config_file = ?config_file, "Configuration loaded");

    if let Command::Config = cli.command {
        println!("{}", cli::render_config(&config)?);
        return Ok(());
    }

    let state = AppState::new(config).await?;
    let mut session = Session::new();

    match cli::run(&cli, &state, &mut session).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.message);
            std::process::exit(1);
        }
    }
}
