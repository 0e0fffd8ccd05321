//! homectl CLI - home monitoring and control
//!
//! Entry point for the `homectl` binary:
//! - `serve`: HTTP API plus the background sensor poller
//! - `poll`: poll sensors once and print the results
//! - `config`: inspect or create `~/.homectl/config.toml`

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::HomectlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "homectl",
    author,
    version,
    about = "Monitor home sensors, keep their measurement history and switch relays",
    long_about = "Define homes, rooms and HTTP sensors, poll them on an interval into SQLite, \
                  and serve the history and relay controls over a JSON API."
)]
struct Cli {
    /// Config file (default: ~/.homectl/config.toml)
    #[arg(long, short = 'c', global = true, env = "HOMECTL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API and the background poller
    Serve(commands::serve::ServeArgs),
    /// Poll sensors once and record the measurements
    Poll(commands::poll::PollArgs),
    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // before parsing so HOMECTL_* from .env files reach clap
    let env_files = config::load_env_files();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    config::log_env_files(&env_files);

    let config = HomectlConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await?,
        Commands::Poll(args) => commands::run_poll(args, config).await?,
        Commands::Config(args) => commands::run_config(args, &config)?,
    }

    Ok(())
}
