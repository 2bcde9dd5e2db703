//! # sk-protocol
//!
//! Core protocol definitions and data models for showcase-kit.
//!
//! This crate defines all shared data structures used for:
//! - Scenario script parsing (YAML scenarios, TOML config)
//! - Parsed CSV tables handed over by file intake
//! - Runtime pipeline state and log entries
//! - Communication between a front-end (TUI, headless CLI) and the Core
//!
//! ## Modules
//!
//! - [`scenario_models`]: Scenario scripts (stages, log lines, metrics, charts)
//! - [`config_models`]: Global configuration from config.toml
//! - [`table_models`]: Parsed tabular input
//! - [`run_models`]: Pipeline run state, log entries and run reports
//! - [`ipc`]: Operations and Events for Core-UI communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs and uuid
//! - TypeScript generation: All types derive `TS` for browser clients
//! - Independent compilation: No dependencies on other showcase-kit crates

pub mod config_models;
pub mod ipc;
pub mod run_models;
pub mod scenario_models;
pub mod table_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use ipc::*;
pub use run_models::*;
pub use scenario_models::*;
pub use table_models::*;
