//! Embedded template files for .showcase-kit initialization.
//!
//! The workspace `templates/` directory is embedded at compile time. It holds
//! the default `config.toml`, the built-in scenario scripts and a sample CSV,
//! so the binary can play demos and generate `.showcase-kit/` without any
//! files on disk.

use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// The path is relative to the crate root:
/// - `CARGO_MANIFEST_DIR` = `crates/core`
/// - `../../templates` = workspace `templates/`
///
/// With the `debug-embed` feature, debug builds embed the files as well
/// instead of reading them from disk.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path.
///
/// # Arguments
/// * `path` - Relative path from templates root (e.g., "config.toml", "scenarios/trend-detection.yaml")
///
/// # Returns
/// The file content as a String, or None if the file doesn't exist.
///
/// # Example
/// ```
/// use sk_core::init::templates::get_template;
///
/// let config = get_template("config.toml").expect("config.toml should exist");
/// assert!(config.contains("time-scale ="));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files in a directory, sorted by path.
///
/// # Arguments
/// * `prefix` - Directory prefix (e.g., "scenarios/", "samples/")
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}
