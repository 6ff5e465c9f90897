//! Telemetry initialization.
//!
//! Provides configuration and initialization for the tracing subscriber.

use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Configuration for telemetry initialization.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Level for subvendor's own events
    pub default_level: Level,
    /// Whether to include the target (module path)
    pub include_target: bool,
    /// Whether to use ANSI colors
    pub ansi_colors: bool,
    /// Filter directive used when `RUST_LOG` is unset (overrides default_level)
    pub filter_directive: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            include_target: false,
            ansi_colors: std::io::stderr().is_terminal(),
            filter_directive: None,
        }
    }
}

impl TelemetryConfig {
    /// Configuration for the CLI: quiet by default, debug with `--verbose`.
    pub fn for_cli(verbose: bool) -> Self {
        if verbose {
            Self {
                default_level: Level::DEBUG,
                include_target: true,
                filter_directive: Some("warn,subvendor=debug".to_string()),
                ..Self::default()
            }
        } else {
            Self::default()
        }
    }
}

/// Guard that keeps the telemetry subscriber active.
pub struct TelemetryGuard {
    #[allow(dead_code)]
    _private: (),
}

/// Initialize telemetry with the given configuration.
///
/// Events are written to stderr so stdout stays clean for `list --json`.
/// A non-empty `RUST_LOG` always wins over the config.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(config, rust_log.as_deref())?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .compact();

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(TelemetryGuard { _private: () })
}

fn build_filter(config: &TelemetryConfig, rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
    if let Some(directive) = rust_log.map(str::trim).filter(|d| !d.is_empty()) {
        return Ok(EnvFilter::try_new(directive)?);
    }

    let filter = match config.filter_directive {
        Some(ref directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::new(config.default_level.to_string())
            .add_directive(format!("subvendor={}", config.default_level).parse()?),
    };
    Ok(filter)
}
