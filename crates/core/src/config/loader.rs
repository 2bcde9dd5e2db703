//! Configuration loader for built-in scenarios and the `.showcase-kit/`
//! directory.
//!
//! Sources, in order of precedence (later wins):
//! - Built-in scenario scripts embedded from `templates/scenarios/`
//! - `.showcase-kit/config.toml`: Global settings
//! - `.showcase-kit/scenarios/*.yaml`: User scenario scripts

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use crate::engine::pacing::MAX_TIME_SCALE;
use crate::init::templates::{get_template, list_templates};
use sk_protocol::config_models::GlobalConfig;
use sk_protocol::scenario_models::ScenarioScript;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Loads all configuration for the project rooted at `root`.
///
/// A missing `.showcase-kit/` directory (or missing files inside it) is not
/// an error: the defaults and built-in scenarios are used.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid TOML or YAML syntax
/// - A scenario has no stages, or `time-scale` is negative or not finite
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let sk_dir = root.join(".showcase-kit");

    let mut scenarios = load_builtin_scenarios()?;

    if !sk_dir.exists() {
        return Ok(AppConfig {
            global: GlobalConfig::default(),
            scenarios,
        });
    }

    let global = load_global_config(&sk_dir)?;

    for scenario in load_user_scenarios(&sk_dir)? {
        match scenarios.iter_mut().find(|s| s.id == scenario.id) {
            Some(existing) => {
                tracing::debug!(id = %scenario.id, "user scenario overrides built-in");
                *existing = scenario;
            }
            None => scenarios.push(scenario),
        }
    }

    Ok(AppConfig { global, scenarios })
}

/// Parses the scenario scripts embedded in the binary.
pub fn load_builtin_scenarios() -> ConfigResult<Vec<ScenarioScript>> {
    let mut scenarios = Vec::new();

    for template_path in list_templates("scenarios/") {
        let path = PathBuf::from("templates").join(&template_path);
        let content = get_template(&template_path).unwrap_or_default();
        scenarios.push(parse_scenario(&path, &content)?);
    }

    Ok(scenarios)
}

/// Loads global configuration from `config.toml`.
fn load_global_config(sk_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = sk_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    if !(0.0..=MAX_TIME_SCALE).contains(&config.time_scale) {
        return Err(ConfigError::InvalidTimeScale {
            path: config_path,
            value: config.time_scale,
        });
    }

    Ok(config)
}

/// Loads all scenario scripts from `scenarios/*.yaml`, in file name order.
fn load_user_scenarios(sk_dir: &Path) -> ConfigResult<Vec<ScenarioScript>> {
    let scenarios_dir = sk_dir.join("scenarios");

    if !scenarios_dir.exists() {
        return Ok(Vec::new());
    }

    let mut scenarios = Vec::new();

    for entry in WalkDir::new(&scenarios_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: scenarios_dir.clone(),
            source,
        })?;

        let path = entry.path();

        let ext = path.extension().and_then(|s| s.to_str());
        if ext != Some("yaml") && ext != Some("yml") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        scenarios.push(parse_scenario(path, &content)?);
    }

    Ok(scenarios)
}

fn parse_scenario(path: &Path, content: &str) -> ConfigResult<ScenarioScript> {
    let scenario: ScenarioScript =
        serde_yaml::from_str(content).map_err(|source| ConfigError::YamlParse {
            path: path.to_path_buf(),
            source,
        })?;

    if scenario.steps.is_empty() {
        return Err(ConfigError::EmptyScenario {
            path: path.to_path_buf(),
            id: scenario.id,
        });
    }

    for message in scenario.orphaned_messages() {
        tracing::warn!(
            scenario = %scenario.id,
            step = message.step_index,
            "log message refers to a missing stage and will never be shown"
        );
    }

    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_dir() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(".showcase-kit/scenarios")).unwrap();
        temp_dir
    }

    #[test]
    fn test_builtin_scenarios_parse() {
        let scenarios = load_builtin_scenarios().unwrap();

        assert_eq!(scenarios.len(), 8);
        for scenario in &scenarios {
            assert_eq!(scenario.steps.len(), 6, "{} should have 6 stages", scenario.id);
            assert_eq!(scenario.orphaned_messages().count(), 0);
            assert!(!scenario.metrics.is_empty());
        }
    }

    #[tokio::test]
    async fn test_load_config_without_directory() {
        let temp_dir = TempDir::new().unwrap();

        let config = load_config(temp_dir.path()).await.unwrap();

        assert_eq!(config.global, GlobalConfig::default());
        assert_eq!(config.scenarios.len(), 8);
        assert!(config.select_scenario(None).is_ok());
    }

    #[tokio::test]
    async fn test_load_global_config() {
        let temp_dir = setup_test_dir();
        fs::write(
            temp_dir.path().join(".showcase-kit/config.toml"),
            "time-scale = 0.25\ndefault-scenario = \"trend-detection\"\n",
        )
        .unwrap();

        let config = load_config(temp_dir.path()).await.unwrap();

        assert_eq!(config.global.time_scale, 0.25);
        assert_eq!(config.select_scenario(None).unwrap().id, "trend-detection");
        assert_eq!(
            config.select_scenario(Some("multi-warehouse")).unwrap().id,
            "multi-warehouse"
        );
    }

    #[tokio::test]
    async fn test_negative_time_scale_is_rejected() {
        let temp_dir = setup_test_dir();
        fs::write(
            temp_dir.path().join(".showcase-kit/config.toml"),
            "time-scale = -1.0\n",
        )
        .unwrap();

        let result = load_config(temp_dir.path()).await;

        assert!(matches!(
            result,
            Err(ConfigError::InvalidTimeScale { value, .. }) if value == -1.0
        ));
    }

    #[tokio::test]
    async fn test_time_scale_above_maximum_is_rejected() {
        let temp_dir = setup_test_dir();
        fs::write(
            temp_dir.path().join(".showcase-kit/config.toml"),
            "time-scale = 1e20\n",
        )
        .unwrap();

        let result = load_config(temp_dir.path()).await;

        assert!(matches!(
            result,
            Err(ConfigError::InvalidTimeScale { value, .. }) if value == 1e20
        ));
    }

    #[tokio::test]
    async fn test_user_scenario_overrides_and_extends() {
        let temp_dir = setup_test_dir();
        let scenarios_dir = temp_dir.path().join(".showcase-kit/scenarios");
        fs::write(
            scenarios_dir.join("demand-forecasting.yaml"),
            "id: demand-forecasting\nname: Custom Forecaster\nsteps: [Only]\n",
        )
        .unwrap();
        fs::write(
            scenarios_dir.join("churn.yml"),
            "id: churn\nname: Churn Agent\nsteps: [Load, Score]\n",
        )
        .unwrap();
        fs::write(scenarios_dir.join("README.md"), "ignored").unwrap();

        let config = load_config(temp_dir.path()).await.unwrap();

        assert_eq!(config.scenarios.len(), 9);
        assert_eq!(
            config.find_scenario("demand-forecasting").unwrap().name,
            "Custom Forecaster"
        );
        assert_eq!(config.scenarios.last().unwrap().id, "churn");
    }

    #[tokio::test]
    async fn test_scenario_without_steps_is_rejected() {
        let temp_dir = setup_test_dir();
        fs::write(
            temp_dir.path().join(".showcase-kit/scenarios/empty.yaml"),
            "id: empty\nname: Empty\nsteps: []\n",
        )
        .unwrap();

        let result = load_config(temp_dir.path()).await;

        assert!(matches!(result, Err(ConfigError::EmptyScenario { id, .. }) if id == "empty"));
    }

    #[tokio::test]
    async fn test_invalid_yaml_reports_path() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join(".showcase-kit/scenarios/broken.yaml");
        fs::write(&path, "id: [unclosed\n").unwrap();

        let result = load_config(temp_dir.path()).await;

        match result {
            Err(ConfigError::YamlParse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected YamlParse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_scenario_lists_available() {
        let config = AppConfig {
            global: GlobalConfig::default(),
            scenarios: load_builtin_scenarios().unwrap(),
        };

        let err = config.find_scenario("nope").unwrap_err();

        assert!(err.to_string().contains("trend-detection"));
    }
}
