//! Runtime settings for the `job_scout` binary.
//!
//! Read from `job_scout.ron` in the current working directory when present.
//! The source list itself is compiled in; see `sources`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::LevelFilter;
use scout_engine::{FetchSettings, OrchestratorSettings, MAX_RESULTS_PER_TASK};
use scout_logging::{scout_info, LogDestination};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "job_scout.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("results_per_task must be between 1 and {max}, got {0}", max = MAX_RESULTS_PER_TASK)]
    ResultsPerTask(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Shared deadline for the whole run.
    pub timeout_secs: u64,
    pub results_per_task: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        let run = OrchestratorSettings::default();
        Self {
            timeout_secs: run.timeout.as_secs(),
            results_per_task: run.results_per_task,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            log_destination: LogDestination::Terminal,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            results_per_task: self.results_per_task,
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !(1..=MAX_RESULTS_PER_TASK).contains(&self.results_per_task) {
            return Err(ConfigError::ResultsPerTask(self.results_per_task));
        }
        self.log_level()?;
        Ok(self)
    }
}

/// Loads the config file at `path`; a missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let config: AppConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    scout_info!("Loaded configuration from {:?}", path);
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.orchestrator_settings().timeout, Duration::from_secs(10));
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(timeout_secs: 3, log_destination: Both)").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.results_per_task, 10);
        assert_eq!(config.fetch_settings().max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(timeout_secs: \"soon\")").unwrap();
        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(timeout_secs: 0)").unwrap();
        assert!(matches!(load(&path), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn oversized_results_per_task_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(results_per_task: 1000000000000000000)").unwrap();
        assert!(matches!(
            load(&path),
            Err(ConfigError::ResultsPerTask(1_000_000_000_000_000_000))
        ));
    }

    #[test]
    fn zero_results_per_task_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(results_per_task: 0)").unwrap();
        assert!(matches!(load(&path), Err(ConfigError::ResultsPerTask(0))));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config = AppConfig {
            log_level: "loud".into(),
            ..AppConfig::default()
        };
        assert!(matches!(config.log_level(), Err(ConfigError::LogLevel(_))));
    }
}
