//! Kundo CLI - Command-line interface
//!
//! Runs the web server or searches the movie provider from the terminal.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use kundo_core::RuntimeMode;
use kundo_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "kundo")]
#[command(about = "Movie search with a two-source rating consensus")]
#[command(version)]
struct Cli {
    /// Console log level
    #[arg(long, value_enum, default_value_t = CliLogLevel::Info, global = true)]
    log_level: CliLogLevel,

    /// Runtime mode; production requires OMDB_API_KEY
    #[arg(long, value_enum, default_value_t = RuntimeMode::Development, global = true)]
    mode: RuntimeMode,

    /// Directory for the per-run debug log
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.into(), cli.logs_dir.as_deref())?;

    commands::run_command(cli.command, cli.mode).await
}
