//! Communication protocol between a front-end and the Core.
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from the front-end (TUI, headless CLI) to Core
//! - `Event`: State transitions sent from Core to the front-end
//!
//! Events replace the DOM hook points of a browser page: stage icons and
//! connectors, the live log, the results panel, metric displays addressed by
//! id, and the processing status indicator. A front-end only mirrors them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ts_rs::TS;
use uuid::Uuid;

use crate::run_models::LogEntry;
use crate::scenario_models::ChartSpec;

/// Operations sent from a front-end to the Core.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "selectFile",
///   "payload": { "path": "/tmp/sales.csv" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Offer a file to file intake.
    SelectFile { path: PathBuf },

    /// Start the scripted pipeline. Ignored while a run is active or before
    /// a file has been accepted.
    StartProcessing,

    /// Stop serving operations.
    Shutdown,
}

/// Events sent from the Core to a front-end.
///
/// ```json
/// {
///   "type": "stageActivated",
///   "payload": { "run_id": "uuid-here", "step_index": 2 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A file passed intake; the start control becomes available.
    FileLoaded {
        file_name: String,
        size_bytes: u64,
        row_count: usize,
        headers: Vec<String>,
    },

    /// Processing has begun; the start control is disabled.
    RunStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        scenario_name: String,
    },

    /// A stage icon and label turned active.
    StageActivated {
        #[ts(type = "string")]
        run_id: Uuid,
        step_index: usize,
    },

    /// A stage icon and label turned completed.
    StageCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
        step_index: usize,
    },

    /// The connector between `connector_index` and the next stage filled.
    ConnectorCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
        connector_index: usize,
    },

    /// A new log line; the front-end appends it and scrolls to it.
    LogAppended {
        #[ts(type = "string")]
        run_id: Uuid,
        entry: LogEntry,
    },

    /// Every stage finished; the status indicator reads "complete".
    RunCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// The results panel became visible.
    ResultsRevealed {
        #[ts(type = "string")]
        run_id: Uuid,
    },

    /// A metric display changed value.
    ///
    /// `counting` is true while the counter animation is running and false
    /// on its final frame.
    MetricUpdated {
        #[ts(type = "string")]
        run_id: Uuid,
        target_id: String,
        display: String,
        counting: bool,
    },

    /// The insight card at `index` became visible.
    InsightRevealed {
        #[ts(type = "string")]
        run_id: Uuid,
        index: usize,
    },

    /// A chart should be drawn.
    ChartRendered { chart: ChartSpec },
}
