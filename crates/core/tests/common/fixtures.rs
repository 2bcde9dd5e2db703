//! Test fixtures for creating sample scenarios and input files.

use sk_protocol::ipc::Event;
use sk_protocol::scenario_models::{LogMessage, LogTag, MetricSpec, ScenarioScript};
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A six-stage scenario with exactly one log message per stage.
#[allow(dead_code)]
pub fn six_stage_scenario() -> ScenarioScript {
    let steps: Vec<String> = [
        "Data Ingestion",
        "Feature Engineering",
        "Seasonality Analysis",
        "Trend Detection",
        "Model Training",
        "Forecast Generation",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    let log_messages = (0..steps.len())
        .map(|step_index| LogMessage {
            step_index,
            tag: LogTag::Analysis,
            text: format!("stage {step_index} message"),
            delay_ms: None,
        })
        .collect();

    ScenarioScript {
        id: "six-stage".to_string(),
        name: "Six Stage Agent".to_string(),
        steps,
        log_messages,
        metrics: vec![
            MetricSpec {
                target_id: "metricAccuracy".to_string(),
                start: 0.0,
                end: 96.8,
                suffix: "%".to_string(),
                prefix: String::new(),
            },
            MetricSpec {
                target_id: "metricRevenue".to_string(),
                start: 0.0,
                end: 18.5,
                suffix: "Cr".to_string(),
                prefix: "₹".to_string(),
            },
        ],
        insights: vec![
            "Weekend demand is higher".to_string(),
            "Festive season drives ethnic wear".to_string(),
        ],
        charts: vec![],
    }
}

/// Write a small CSV into a fresh temporary directory.
///
/// Returns the TempDir, which must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_sales_csv() -> std::io::Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("retail-sales.csv");
    std::fs::write(
        &path,
        "date,warehouse,units\n2024-01-01,Mumbai,42\n2024-01-02,Delhi,31\n",
    )?;
    Ok((temp_dir, path))
}

/// Collect every event until all senders are dropped.
#[allow(dead_code)]
pub fn spawn_collector(mut rx: mpsc::Receiver<Event>) -> JoinHandle<Vec<Event>> {
    tokio::spawn(async move {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    })
}
