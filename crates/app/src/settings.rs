//! Application configuration
//!
//! Defaults are overridden by an optional TOML file and then by `GAZE__*`
//! environment variables, e.g. `GAZE__TRACKER__SMOOTHING_FACTOR=0.3`.

use std::path::PathBuf;
use std::time::Duration;

use calibration::CalibrationConfig;
use config::{Config, Environment, File, Source};
use landmarks::{ReadinessPolicy, SimulatedConfig};
use serde::{Deserialize, Serialize};
use tracker::TrackerConfig;

use crate::AppError;

/// Configuration file looked up when none is given
pub const DEFAULT_CONFIG_PATH: &str = "gaze-cursor.toml";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "GAZE";

/// Where landmark frames come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Simulated,
    Replay,
}

/// Landmark source selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// JSON-lines recording, required for `replay`
    pub path: Option<PathBuf>,
    pub simulated: SimulatedConfig,
}

/// Log output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tracker: TrackerConfig,
    pub calibration: CalibrationConfig,
    pub readiness: ReadinessPolicy,
    pub source: SourceConfig,
    /// Time between frame pulls (ms)
    pub frame_interval_ms: u64,
    /// Write every frame outcome to stdout as a JSON line
    pub print_outcomes: bool,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            calibration: CalibrationConfig::default(),
            readiness: ReadinessPolicy::default(),
            source: SourceConfig::default(),
            frame_interval_ms: 33,
            print_outcomes: false,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path` (may be missing) and the process environment
    pub fn load(path: &str) -> Result<Self, AppError> {
        Self::from_sources(
            File::with_name(path).required(false),
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Layer `file` and then `env` over the defaults
    pub fn from_sources<F, E>(file: F, env: E) -> Result<Self, AppError>
    where
        F: Source + Send + Sync + 'static,
        E: Source + Send + Sync + 'static,
    {
        let config: AppConfig = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Checks that need more than one section; the tracker validates its own
    pub fn validate(&self) -> Result<(), AppError> {
        if self.frame_interval_ms == 0 {
            return Err(AppError::Invalid("frame_interval_ms must be positive".into()));
        }
        if self.readiness.attempts == 0 {
            return Err(AppError::Invalid("readiness.attempts must be at least 1".into()));
        }
        if self.source.kind == SourceKind::Replay && self.source.path.is_none() {
            return Err(AppError::Invalid("source.path is required for replay".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::from_sources(File::from_str("", FileFormat::Toml), env(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.calibration.grid.len(), 9);
        assert_eq!(config.readiness.attempts, 20);
    }

    #[test]
    fn test_file_overrides_sections() {
        let toml = r#"
            frame_interval_ms = 20

            [tracker]
            smoothing_factor = 0.25

            [tracker.screen]
            width = 2560.0
            height = 1440.0

            [calibration.timing]
            first_settle_ms = 1000
            settle_ms = 500
            capture_ms = 250

            [source]
            kind = "replay"
            path = "session.jsonl"

            [log]
            json = true
        "#;
        let config = AppConfig::from_sources(File::from_str(toml, FileFormat::Toml), env(&[])).unwrap();

        assert_eq!(config.frame_interval(), Duration::from_millis(20));
        assert_eq!(config.tracker.smoothing_factor, 0.25);
        assert_eq!(config.tracker.blink_threshold, 0.22);
        assert_eq!(config.tracker.screen.width, 2560.0);
        assert_eq!(config.calibration.timing.capture_ms, 250);
        assert_eq!(config.source.kind, SourceKind::Replay);
        assert_eq!(config.source.path, Some(PathBuf::from("session.jsonl")));
        assert!(config.log.json);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_environment_beats_file() {
        let toml = "[tracker]\nsmoothing_factor = 0.25\n";
        let config = AppConfig::from_sources(
            File::from_str(toml, FileFormat::Toml),
            env(&[
                ("GAZE__TRACKER__SMOOTHING_FACTOR", "0.5"),
                ("GAZE__LOG__LEVEL", "debug"),
            ]),
        )
        .unwrap();
        assert_eq!(config.tracker.smoothing_factor, 0.5);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_replay_requires_path() {
        let toml = "[source]\nkind = \"replay\"\n";
        let result = AppConfig::from_sources(File::from_str(toml, FileFormat::Toml), env(&[]));
        assert!(matches!(result, Err(AppError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_frame_interval() {
        let config = AppConfig {
            frame_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
