//! Directory structure and file generation for .showcase-kit initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use std::fs;
use std::path::{Path, PathBuf};

/// Scenario written by a minimal init.
pub const MINIMAL_SCENARIO: &str = "scenarios/demand-forecasting.yaml";

const SAMPLE_CSV: &str = "samples/retail-sales.csv";

/// Options for initializing a .showcase-kit directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where .showcase-kit will be created.
    pub target_dir: PathBuf,

    /// Overwrite an existing .showcase-kit directory.
    pub force: bool,

    /// Write a single scenario instead of all built-ins.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a .showcase-kit directory from the embedded templates.
///
/// ```text
/// .showcase-kit/
/// ├── config.toml
/// ├── samples/
/// │   └── retail-sales.csv
/// └── scenarios/
///     ├── demand-forecasting.yaml
///     └── ... (unless minimal)
/// ```
///
/// # Errors
///
/// - [`InitError::DirectoryExists`] when `.showcase-kit` exists and `force` is off
/// - [`InitError::TemplateNotFound`] when an embedded template is missing
/// - [`InitError::DirectoryCreate`] / [`InitError::FileWrite`] on I/O failures
pub async fn generate_showcase_kit_structure(options: InitOptions) -> InitResult<()> {
    let sk_dir = options.target_dir.join(".showcase-kit");

    if sk_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(sk_dir));
    }

    let scenarios_dir = sk_dir.join("scenarios");
    fs::create_dir_all(&scenarios_dir).map_err(|source| InitError::DirectoryCreate {
        path: scenarios_dir.clone(),
        source,
    })?;

    write_template_file(&sk_dir, "config.toml")?;
    write_template_file(&sk_dir, SAMPLE_CSV)?;

    if options.minimal {
        write_template_file(&sk_dir, MINIMAL_SCENARIO)?;
    } else {
        for scenario_path in list_templates("scenarios/") {
            write_template_file(&sk_dir, &scenario_path)?;
        }
    }

    Ok(())
}

fn write_template_file(sk_dir: &Path, template_path: &str) -> InitResult<()> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = sk_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path,
        source,
    })?;

    Ok(())
}
