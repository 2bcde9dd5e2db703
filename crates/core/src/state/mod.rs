//! State management for scenario runs.
//!
//! This module provides:
//! - Pipeline state machine logic
//! - AgentSession for coordinating intake, runs and results

pub mod pipeline;
pub mod session;
