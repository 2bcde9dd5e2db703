//! Front-end mirror of a scenario run.
//!
//! The view only reflects core events: stage icons, connectors, the live
//! log, file info, the status indicator and the results panel. It never
//! decides anything about the run itself.

use sk_protocol::run_models::{LogEntry, RunStatus, StageStatus};
use sk_protocol::scenario_models::{ChartSpec, ScenarioScript};

/// Details of the accepted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: u64,
    pub row_count: usize,
    pub headers: Vec<String>,
}

/// One metric display on the results panel.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub target_id: String,
    pub label: String,
    pub display: String,
    pub counting: bool,
}

/// One insight card; hidden until revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightCard {
    pub text: String,
    pub visible: bool,
}

/// Everything the TUI draws for the current scenario.
#[derive(Debug, Clone)]
pub struct ScenarioView {
    pub scenario_name: String,
    pub stages: Vec<String>,
    pub stage_status: Vec<StageStatus>,

    /// `connectors[i]` joins stage `i` and `i + 1`.
    pub connectors: Vec<bool>,

    pub file: Option<FileInfo>,
    pub status: RunStatus,
    pub log: Vec<LogEntry>,
    pub results_visible: bool,
    pub metrics: Vec<MetricCard>,
    pub insights: Vec<InsightCard>,
    pub charts: Vec<ChartSpec>,

    /// Last command error or hint, shown in the command bar title.
    pub notice: Option<String>,
}

impl ScenarioView {
    pub fn new(script: &ScenarioScript) -> Self {
        let stage_count = script.steps.len();
        Self {
            scenario_name: script.name.clone(),
            stages: script.steps.clone(),
            stage_status: vec![StageStatus::Pending; stage_count],
            connectors: vec![false; stage_count.saturating_sub(1)],
            file: None,
            status: RunStatus::Idle,
            log: Vec::new(),
            results_visible: false,
            metrics: script
                .metrics
                .iter()
                .map(|metric| MetricCard {
                    target_id: metric.target_id.clone(),
                    label: metric.label(),
                    display: metric.format_value(metric.start),
                    counting: false,
                })
                .collect(),
            insights: script
                .insights
                .iter()
                .map(|text| InsightCard {
                    text: text.clone(),
                    visible: false,
                })
                .collect(),
            charts: Vec::new(),
            notice: None,
        }
    }

    /// Start control availability: a file is loaded and nothing is running.
    pub fn can_start(&self) -> bool {
        self.file.is_some() && self.status != RunStatus::Processing
    }

    /// Return to the pre-run look for a new run.
    pub fn reset_for_run(&mut self) {
        self.stage_status.fill(StageStatus::Pending);
        self.connectors.fill(false);
        self.log.clear();
        self.results_visible = false;
        self.charts.clear();
        for insight in &mut self.insights {
            insight.visible = false;
        }
        for metric in &mut self.metrics {
            metric.counting = false;
        }
        self.status = RunStatus::Processing;
    }

    pub fn metric_mut(&mut self, target_id: &str) -> Option<&mut MetricCard> {
        self.metrics.iter_mut().find(|m| m.target_id == target_id)
    }
}
