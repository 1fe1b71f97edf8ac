//! Diagnostic logging through `tracing` and `tracing-subscriber`.
//!
//! User-facing reports go to stdout through [`crate::output`]. Diagnostics
//! (skipped files, dedicated-page routing, cache decisions) go to stderr
//! through `tracing`, so piping the report stays clean.
//!
//! # Log Levels
//!
//! - `error`: fatal problems
//! - `warn`: content that builds but probably is not what was meant
//! - `info`: stage summaries
//! - `debug`: per-page and per-programme decisions
//! - `trace`: everything else
//!
//! `RUST_LOG` overrides the level picked from the command line.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level for this crate's events; dependencies stay at `warn`.
    pub level: Level,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from CLI flags.
    ///
    /// - `-q`: error level (wins over `-v`)
    /// - no flag: info level
    /// - `-v`: debug level
    /// - `-vv` and up: trace level
    #[must_use]
    pub fn from_verbosity(verbosity: u8, quiet: bool) -> Self {
        let level = match (quiet, verbosity) {
            (true, _) => Level::ERROR,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber, writing to stderr without timestamps.
///
/// Calling it again (tests, embedding) leaves the first subscriber in place.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

/// Build an `EnvFilter` from the given level, respecting the `RUST_LOG` env var.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: Level) -> String {
    format!("warn,daystar_site={}", level.as_str().to_lowercase())
}
