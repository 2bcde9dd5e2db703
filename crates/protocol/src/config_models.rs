//! Global configuration models for `.showcase-kit/config.toml`.
//!
//! This module defines the structure of the global configuration file that
//! controls project-wide settings for showcase-kit.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

/// Represents global settings from `.showcase-kit/config.toml`.
///
/// # Example
///
/// ```toml
/// # .showcase-kit/config.toml
/// time-scale = 1.0
/// default-scenario = "demand-forecasting"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Multiplier applied to every scripted delay and animation.
    ///
    /// `1.0` plays scenarios at their scripted pace, `0.5` twice as fast,
    /// `0.0` without any waiting at all.
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,

    /// Scenario opened when no `--scenario` flag is given.
    #[serde(default)]
    pub default_scenario: Option<String>,
}

fn default_time_scale() -> f64 {
    1.0
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
            default_scenario: None,
        }
    }
}
