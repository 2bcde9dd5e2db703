//! Initialization module for creating .showcase-kit directory structures.
//!
//! Generates a `.showcase-kit/` directory with:
//! - Global configuration (`config.toml`)
//! - Scenario scripts (`scenarios/*.yaml`) to edit or extend
//! - A sample CSV to feed the demos (`samples/retail-sales.csv`)
//!
//! # Example
//!
//! ```no_run
//! use sk_core::init::{InitOptions, generate_showcase_kit_structure};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! generate_showcase_kit_structure(options).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

pub use error::{InitError, InitResult};
pub use generator::{generate_showcase_kit_structure, InitOptions, MINIMAL_SCENARIO};
pub use templates::{get_template, list_templates};
