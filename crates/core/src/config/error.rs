//! Errors raised while loading `config.toml` and scenario scripts.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A scenario script is not valid YAML or misses required keys.
    #[error("Failed to parse scenario at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to scan scenario directory {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// `time-scale` is negative, not finite or above the maximum.
    #[error("Invalid time-scale {value} in {path}: expected a number from 0 to 100")]
    InvalidTimeScale { path: PathBuf, value: f64 },

    /// A scenario without stages has nothing to play.
    #[error("Scenario '{id}' in {path} has no steps")]
    EmptyScenario { path: PathBuf, id: String },

    #[error("Scenario '{id}' not found. Available: {available}")]
    ScenarioNotFound { id: String, available: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
