#![deny(missing_docs)]

//! # Logging
//!
//! Installs the global `tracing` subscriber. Output goes to stderr.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of log records.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single line records.
    #[default]
    Text,
    /// One JSON object per record.
    Json,
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `verbose`.
pub fn initialize(verbose: bool, format: LogFormat) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}
