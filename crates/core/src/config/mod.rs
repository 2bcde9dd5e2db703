//! Configuration loading and management.
//!
//! This module loads the global settings and scenario scripts, merging the
//! built-in scenarios with those found in the `.showcase-kit/` directory.

pub mod error;
pub mod loader;
pub mod models;
