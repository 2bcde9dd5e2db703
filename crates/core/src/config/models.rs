//! Configuration models that aggregate all settings.
//!
//! This module provides the unified `AppConfig` structure that combines
//! global settings and scenario scripts into a single configuration object.

use crate::config::error::{ConfigError, ConfigResult};
use sk_protocol::config_models::GlobalConfig;
use sk_protocol::scenario_models::ScenarioScript;

/// Scenario used when neither a flag nor `config.toml` names one.
pub const FALLBACK_SCENARIO: &str = "demand-forecasting";

/// Unified application configuration.
///
/// This structure aggregates all configuration sources:
/// - `config.toml`: Global settings
/// - Built-in scenario scripts embedded in the binary
/// - `scenarios/*.yaml`: User scenarios, replacing built-ins with the same id
///
/// # Example
///
/// ```rust,no_run
/// use sk_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// let scenario = config.find_scenario("trend-detection")?;
/// println!("{} has {} stages", scenario.name, scenario.steps.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// All scenario scripts, built-ins first in file name order, then
    /// user-only scenarios.
    pub scenarios: Vec<ScenarioScript>,
}

impl AppConfig {
    /// Look up a scenario by id.
    pub fn find_scenario(&self, id: &str) -> ConfigResult<&ScenarioScript> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ConfigError::ScenarioNotFound {
                id: id.to_string(),
                available: self
                    .scenarios
                    .iter()
                    .map(|s| s.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Resolve the scenario to play: the requested id, else the configured
    /// default, else [`FALLBACK_SCENARIO`].
    pub fn select_scenario(&self, requested: Option<&str>) -> ConfigResult<&ScenarioScript> {
        let id = requested
            .or(self.global.default_scenario.as_deref())
            .unwrap_or(FALLBACK_SCENARIO);
        self.find_scenario(id)
    }
}
