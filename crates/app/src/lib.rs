//! Gaze Cursor Runtime
//!
//! Wires a landmark source to the gaze tracker:
//! - Layered configuration (defaults, TOML file, `GAZE__*` environment)
//! - Logging setup
//! - Readiness wait, timed calibration and the frame loop

pub mod runtime;
pub mod settings;

pub use runtime::{open_source, run, run_with_source, SessionSummary};
pub use settings::{AppConfig, LogConfig, SourceConfig, SourceKind, DEFAULT_CONFIG_PATH};

use std::str::FromStr;

use landmarks::LandmarkError;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracker::TrackerError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Landmark source error: {0}")]
    Source(#[from] LandmarkError),

    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LogConfig) -> Result<(), AppError> {
    let level = Level::from_str(&config.level)
        .map_err(|_| AppError::Logging(format!("unknown log level '{}'", config.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| AppError::Logging(e.to_string()))
}
