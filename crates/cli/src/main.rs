//! notes - command-line client for the notes service

mod commands;
mod config;
mod output;
mod state_dir;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Commands;
use config::Settings;
use notes_core::tracing::{InstrumentationConfig, init_tracing};
use notes_frontend_common::{AppContext, FileCredentialStore, GuardOptions};
use notes_http::NotesClient;
use output::TerminalNotifier;
use state_dir::StateDir;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Command-line client for the notes service")]
#[command(version)]
struct Cli {
    /// Base endpoint of the notes API, overriding every other source
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Settings file (defaults to config.toml in the config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Keep settings and credentials under this directory
    #[arg(short = 'd', long, global = true, env = "NOTES_STATE_DIR")]
    data_dir: Option<PathBuf>,

    /// More log output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&InstrumentationConfig::from_env().with_verbosity(cli.verbose))?;

    let state = StateDir::resolve(cli.data_dir);
    let settings = Settings::load(cli.config.as_deref(), &state.config_file())?;
    let base_url = cli.api_url.unwrap_or(settings.api.base_url);
    debug!(%base_url, credentials = %state.credentials_path().display(), "Starting notes CLI");

    let store = FileCredentialStore::open(state.credentials_path())
        .context("Failed to open credential store")?;
    let builder = NotesClient::builder()
        .base_url(base_url)
        .timeout(Duration::from_secs(settings.api.timeout_secs));
    let ctx = AppContext::from_builder(builder, Arc::new(store), Arc::new(TerminalNotifier))
        .context("Failed to build API client")?;

    match cli
        .command
        .execute(&ctx, GuardOptions::from(&settings.session))
        .await
    {
        Ok(code) => Ok(code),
        Err(e) => {
            error!("Command failed: {e:#}");
            Err(e)
        }
    }
}
