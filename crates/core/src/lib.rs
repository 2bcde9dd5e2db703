//! # sk-core
//!
//! Scenario playback engine for showcase-kit.
//!
//! This crate provides:
//! - Configuration loading from the `.showcase-kit/` directory and the
//!   built-in scenario scripts
//! - CSV file intake
//! - The step pipeline runner and its live log
//! - The results presenter (metric counters, insights, chart hook)
//! - Session control replacing a page-global agent object
//!
//! ## Modules
//!
//! - [`config`]: Configuration and scenario loading
//! - [`intake`]: File selection and CSV parsing
//! - [`engine`]: Timed delays, the stage runner and the log sink
//! - [`presenter`]: Results reveal and counter animations
//! - [`state`]: Pipeline state transitions and the session controller
//! - [`init`]: `.showcase-kit/` project generation
//! - [`format`]: Display helpers for sizes, currency and timestamps
//! - [`logging`]: Tracing subscriber setup

pub mod config;
pub mod engine;
pub mod format;
pub mod init;
pub mod intake;
pub mod logging;
pub mod presenter;
pub mod state;
