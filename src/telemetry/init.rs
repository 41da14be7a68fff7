//! Telemetry initialization.
//!
//! Provides configuration and initialization for the tracing subscriber.

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Configuration for telemetry initialization.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Default log level
    pub default_level: Level,
    /// Whether to include file and line numbers
    pub include_file_line: bool,
    /// Whether to include the target (module path)
    pub include_target: bool,
    /// Whether to use ANSI colors
    pub ansi_colors: bool,
    /// Custom filter directive (overrides default_level if set)
    pub filter_directive: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            include_file_line: false,
            include_target: false,
            ansi_colors: true,
            filter_directive: None,
        }
    }
}

impl TelemetryConfig {
    /// Configuration for `--verbose` runs.
    pub fn verbose() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_file_line: false,
            include_target: true,
            ansi_colors: true,
            filter_directive: None,
        }
    }

    /// Pick the configuration for the given CLI flags.
    pub fn for_cli(verbose: bool) -> Self {
        let config = if verbose {
            Self::verbose()
        } else {
            Self::default()
        };

        Self {
            ansi_colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
            ..config
        }
    }

    fn filter(&self) -> anyhow::Result<EnvFilter> {
        if let Some(ref directive) = self.filter_directive {
            return Ok(EnvFilter::try_new(directive)?);
        }

        // RUST_LOG wins when set; otherwise only our own crate logs
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::new(format!(
                "warn,gitpersona={}",
                self.default_level
            ))),
        }
    }
}

/// Initialize telemetry with the given configuration.
///
/// Fails if a global subscriber is already installed.
///
/// # Example
///
/// ```rust,ignore
/// use gitpersona::telemetry::{init_telemetry, TelemetryConfig};
///
/// init_telemetry(&TelemetryConfig::for_cli(false))?;
/// ```
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(config.filter()?)
        .with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
