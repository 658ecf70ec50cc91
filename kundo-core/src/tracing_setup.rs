//! Tracing setup for Kundo
//!
//! Console output follows the level the user picked; a second layer writes
//! everything down to TRACE into a per-run log file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::Result;

/// Name of the debug log written on every run, overwriting the previous one.
pub const LAST_RUN_LOG: &str = "kundo-last-run.log";

/// Builds the console filter directive for a level.
///
/// Kundo crates and HTTP request spans follow `level`; the HTTP client and
/// server internals stay at `warn` unless the user asked for `trace`.
pub fn console_directive(level: Level) -> String {
    if level == Level::TRACE {
        return "trace".to_string();
    }
    let level = level.to_string().to_lowercase();
    format!(
        "warn,kundo_core={level},kundo_search={level},kundo_web={level},kundo={level},tower_http={level}"
    )
}

/// Initialize tracing with dual output: console (user level) + file (full trace).
///
/// `RUST_LOG` overrides the console filter when set. Returns the path of the
/// debug log file.
///
/// # Errors
///
/// - `KundoError::Io` - If the logs directory cannot be created or the log file cannot be opened
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = logs_dir.unwrap_or(Path::new("logs"));
    fs::create_dir_all(dir)?;

    let log_file_path = dir.join(LAST_RUN_LOG);
    let run_log = File::create(&log_file_path)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_directive(console_level)));

    let console = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_filter(console_filter);

    let file = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(run_log)
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();

    tracing::info!(
        console = %console_level,
        debug_file = %log_file_path.display(),
        "Tracing initialized"
    );

    Ok(log_file_path)
}

/// Console verbosity picked on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliLogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    #[default]
    Info,
    Debug,
    /// Also lifts the HTTP stack out of `warn`
    Trace,
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_levels_map_onto_tracing_levels() {
        use clap::ValueEnum;

        assert_eq!(Level::from(CliLogLevel::default()), Level::INFO);
        assert_eq!(
            CliLogLevel::from_str("warning", true).map(Level::from),
            Ok(Level::WARN)
        );
        assert_eq!(Level::from(CliLogLevel::Trace), Level::TRACE);
        assert!(CliLogLevel::from_str("loud", true).is_err());
    }

    #[test]
    fn test_console_directive_scopes_kundo_crates() {
        let directive = console_directive(Level::DEBUG);
        assert!(directive.starts_with("warn,"));
        assert!(directive.contains("kundo_web=debug"));
        assert!(directive.contains("tower_http=debug"));
        assert_eq!(console_directive(Level::TRACE), "trace");
    }

    #[test]
    fn test_init_writes_run_log_into_logs_dir() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        let path = init_tracing(Level::WARN, Some(&logs)).unwrap();

        assert_eq!(path, logs.join(LAST_RUN_LOG));
        assert!(path.exists());
    }
}
