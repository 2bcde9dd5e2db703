//! Runtime pipeline state models.
//!
//! This module defines the structures for tracking one scripted run from the
//! moment processing starts until the results panel has finished animating.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::scenario_models::LogTag;

/// Overall status shown by the processing status indicator.
///
/// Idle -> Processing -> Complete, then back to Processing on a new run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// No run has been started yet.
    #[default]
    Idle,

    /// The stage pipeline is playing.
    Processing,

    /// Every stage has completed.
    Complete,
}

/// Visual state of one stage icon.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    #[default]
    Pending,
    Active,
    Completed,
}

/// Mutable run state owned by a session.
///
/// Created with `is_processing = false`. Only one run may be active at a
/// time; starting while `is_processing` is set is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct PipelineState {
    /// Identifier of the current (or last) run.
    #[ts(type = "string | null")]
    pub run_id: Option<Uuid>,

    /// Zero-based index of the stage being played.
    pub current_step_index: usize,

    pub is_processing: bool,

    pub status: RunStatus,
}

/// A single line of the live log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct LogEntry {
    /// Wall-clock time of the append, `HH:MM:SS` (24-hour).
    pub timestamp: String,
    pub tag: LogTag,
    pub text: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} {}", self.timestamp, self.tag, self.text)
    }
}

/// Final reading of a metric counter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct MetricReading {
    pub target_id: String,
    pub value: f64,
    /// Decorated text, e.g. `₹18.5Cr`.
    pub display: String,
}

/// Everything a finished run produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct RunReport {
    #[ts(type = "string")]
    pub run_id: Uuid,
    pub entries: Vec<LogEntry>,
    pub metrics: Vec<MetricReading>,
}
