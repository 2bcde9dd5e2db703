//! Common test utilities and helpers for E2E tests.
//!
//! This module provides shared functionality across all E2E tests including:
//! - Test fixtures (sample scenarios, CSV files, sessions)
//! - Custom assertions over event streams

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
