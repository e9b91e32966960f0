//! Tracing setup for nextslot
//!
//! Resolution itself only emits events; installing a subscriber is left to
//! the binary. Output is a compact line per event on stderr so it never
//! mixes with rendered rows on stdout.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingConfig {
    /// The default log level when RUST_LOG is not set
    pub default_level: Level,
    /// Whether to include file/line information in logs
    pub include_location: bool,
    /// Whether to include target (module path) in logs
    pub include_target: bool,
}

impl TracingConfig {
    /// Debug runs: resolution steps, with source locations
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_location: true,
            include_target: true,
        }
    }

    /// Normal runs: warnings only, such as skipped invalid records
    #[must_use]
    pub fn cli_quiet() -> Self {
        Self {
            default_level: Level::WARN,
            include_location: false,
            include_target: false,
        }
    }

    /// Picks the preset matching the `--debug` flag or `debug` config key.
    #[must_use]
    pub fn for_debug(debug: bool) -> Self {
        if debug {
            Self::cli_debug()
        } else {
            Self::cli_quiet()
        }
    }

    /// The env filter directive used when `RUST_LOG` is not set.
    ///
    /// Matches every `nextslot*` target, so both the library and the binary
    /// are covered while dependencies stay silent.
    pub fn default_directive(&self) -> String {
        format!("nextslot={}", self.default_level)
    }
}

/// Initialize tracing with the given configuration.
///
/// This should be called once at the start of the application.
/// The `RUST_LOG` environment variable overrides the default directive.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let layer = fmt::layer()
        .compact()
        .without_time()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_target(config.include_target);

    let subscriber = tracing_subscriber::registry().with(env_filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
