//! Scenario script models for `.showcase-kit/scenarios/*.yaml`.
//!
//! A scenario script is the complete, precomputed content of one demo agent:
//! its stage names, the log lines played during each stage, the figures the
//! results panel counts up to and the charts it shows. Nothing in a script is
//! derived from the uploaded file.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Delay applied before a log message that does not specify one.
pub const DEFAULT_MESSAGE_DELAY_MS: u64 = 400;

/// Category label shown next to every log line.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogTag {
    Data,
    Model,
    Analysis,
    Insight,
    Success,
}

impl LogTag {
    /// The literal label as displayed in the log.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::Data => "DATA",
            LogTag::Model => "MODEL",
            LogTag::Analysis => "ANALYSIS",
            LogTag::Insight => "INSIGHT",
            LogTag::Success => "SUCCESS",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scripted log line bound to one stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct LogMessage {
    /// Zero-based index of the stage this message belongs to.
    #[serde(rename = "step")]
    pub step_index: usize,

    pub tag: LogTag,

    pub text: String,

    /// Pause before the message is appended. Defaults to 400 ms.
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

impl LogMessage {
    /// The delay actually waited before this message is emitted.
    pub fn effective_delay_ms(&self) -> u64 {
        self.delay_ms.unwrap_or(DEFAULT_MESSAGE_DELAY_MS)
    }
}

/// Describes one counter animation on the results panel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct MetricSpec {
    /// Identifier of the display element, e.g. `metricAccuracy`.
    #[serde(rename = "id")]
    pub target_id: String,

    #[serde(default)]
    pub start: f64,

    pub end: f64,

    #[serde(default)]
    pub suffix: String,

    #[serde(default)]
    pub prefix: String,
}

impl MetricSpec {
    /// Human-readable label derived from the target id.
    ///
    /// `metricFillRate` becomes `Fill Rate`, `metricLTV` becomes `LTV`.
    pub fn label(&self) -> String {
        let stem = self
            .target_id
            .strip_prefix("metric")
            .filter(|rest| !rest.is_empty())
            .unwrap_or(&self.target_id);

        let chars: Vec<char> = stem.chars().collect();
        let mut label = String::with_capacity(stem.len() + 4);
        for (i, c) in chars.iter().enumerate() {
            let starts_word = i > 0
                && c.is_uppercase()
                && (chars[i - 1].is_lowercase()
                    || chars.get(i + 1).is_some_and(|next| next.is_lowercase()));
            if starts_word {
                label.push(' ');
            }
            label.push(*c);
        }
        label
    }

    /// Formats a value with this metric's prefix, suffix and one decimal.
    pub fn format_value(&self, value: f64) -> String {
        format!("{}{value:.1}{}", self.prefix, self.suffix)
    }
}

/// Visual form of a chart.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Line,
    Bar,
    StackedBar,
    Doughnut,
}

/// One named series of a chart.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Static chart data rendered once results are shown.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct ChartSpec {
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    #[serde(default)]
    pub y_axis_title: Option<String>,
}

/// The complete script of one demo agent.
///
/// # Example
///
/// ```yaml
/// id: demand-forecasting
/// name: Demand Forecasting Agent
/// steps:
///   - Data Ingestion
///   - Model Training
/// log-messages:
///   - { step: 0, tag: DATA, text: "Loading CSV data... 165 records found", delay-ms: 300 }
///   - { step: 1, tag: SUCCESS, text: "Model validation accuracy: 96.8%" }
/// metrics:
///   - { id: metricAccuracy, end: 96.8, suffix: "%" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct ScenarioScript {
    /// Slug used to select the scenario, e.g. `demand-forecasting`.
    pub id: String,

    /// Display name, e.g. `Demand Forecasting Agent`.
    pub name: String,

    /// Ordered stage names.
    pub steps: Vec<String>,

    #[serde(default)]
    pub log_messages: Vec<LogMessage>,

    #[serde(default)]
    pub metrics: Vec<MetricSpec>,

    /// Insight cards revealed one after another on the results panel.
    #[serde(default)]
    pub insights: Vec<String>,

    #[serde(default)]
    pub charts: Vec<ChartSpec>,
}

impl ScenarioScript {
    /// Messages scripted for the given stage, in declaration order.
    pub fn messages_for_step(&self, step_index: usize) -> impl Iterator<Item = &LogMessage> {
        self.log_messages
            .iter()
            .filter(move |m| m.step_index == step_index)
    }

    /// Number of messages that will actually be emitted during a run.
    pub fn emitted_message_count(&self) -> usize {
        self.log_messages
            .iter()
            .filter(|m| m.step_index < self.steps.len())
            .count()
    }

    /// Messages bound to a stage index that does not exist.
    pub fn orphaned_messages(&self) -> impl Iterator<Item = &LogMessage> {
        let step_count = self.steps.len();
        self.log_messages
            .iter()
            .filter(move |m| m.step_index >= step_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(id: &str) -> MetricSpec {
        MetricSpec {
            target_id: id.to_string(),
            start: 0.0,
            end: 1.0,
            suffix: String::new(),
            prefix: String::new(),
        }
    }

    #[test]
    fn test_metric_label_from_id() {
        assert_eq!(metric("metricFillRate").label(), "Fill Rate");
        assert_eq!(metric("metricAccuracy").label(), "Accuracy");
        assert_eq!(metric("metricLTV").label(), "LTV");
        assert_eq!(metric("metricROI").label(), "ROI");
        assert_eq!(metric("metricHitRate").label(), "Hit Rate");
        assert_eq!(metric("revenue").label(), "revenue");
    }

    #[test]
    fn test_metric_format_value() {
        let mut spec = metric("metricRevenue");
        spec.prefix = "₹".to_string();
        spec.suffix = "Cr".to_string();

        assert_eq!(spec.format_value(18.5), "₹18.5Cr");
        assert_eq!(spec.format_value(2000.0), "₹2000.0Cr");
    }

    #[test]
    fn test_effective_delay_defaults_to_400() {
        let message = LogMessage {
            step_index: 0,
            tag: LogTag::Data,
            text: "Loading".to_string(),
            delay_ms: None,
        };
        assert_eq!(message.effective_delay_ms(), 400);

        let message = LogMessage {
            delay_ms: Some(250),
            ..message
        };
        assert_eq!(message.effective_delay_ms(), 250);
    }

    #[test]
    fn test_messages_outside_steps_are_not_counted() {
        let script = ScenarioScript {
            id: "s".to_string(),
            name: "S".to_string(),
            steps: vec!["One".to_string()],
            log_messages: vec![
                LogMessage {
                    step_index: 0,
                    tag: LogTag::Data,
                    text: "kept".to_string(),
                    delay_ms: None,
                },
                LogMessage {
                    step_index: 3,
                    tag: LogTag::Data,
                    text: "orphan".to_string(),
                    delay_ms: None,
                },
            ],
            metrics: vec![],
            insights: vec![],
            charts: vec![],
        };

        assert_eq!(script.emitted_message_count(), 1);
        assert_eq!(script.orphaned_messages().count(), 1);
        assert_eq!(script.messages_for_step(0).count(), 1);
    }
}
