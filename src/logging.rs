//! Logging configuration and initialization.
//!
//! This module handles tracing subscriber setup based on CLI verbosity flags
//! and environment variables. The library itself only emits events.

use crate::cli::LogLevel;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn max_level(level: LogLevel) -> Level {
    use LogLevel::*;
    match level {
        Error => Level::ERROR,
        Warn => Level::WARN,
        Info => Level::INFO,
        Debug => Level::DEBUG,
        Trace => Level::TRACE,
    }
}

/// Configure the tracing subscriber.
///
/// `RUST_LOG` directives win when present; otherwise everything at or above the
/// level derived from `-q` / `-v` is shown. Logs go to stderr so stdout carries
/// only the picked path.
pub fn configure_logging(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(max_level(level)).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
