//! Chart rendering hook.

use async_trait::async_trait;
use sk_protocol::ipc::Event;
use sk_protocol::scenario_models::ChartSpec;
use tokio::sync::mpsc::Sender;

/// Draws a scenario's charts once the results panel is visible.
///
/// Called exactly once per presentation, after the metric counters have
/// been scheduled. Whatever it renders is up to the implementation; the
/// presenter only guarantees the call.
#[async_trait]
pub trait ChartHook: Send + Sync {
    async fn render_charts(&self);
}

/// Emits one [`Event::ChartRendered`] per scripted chart.
#[derive(Debug, Clone)]
pub struct ScriptedCharts {
    charts: Vec<ChartSpec>,
    events_tx: Sender<Event>,
}

impl ScriptedCharts {
    pub fn new(charts: Vec<ChartSpec>, events_tx: Sender<Event>) -> Self {
        Self { charts, events_tx }
    }
}

#[async_trait]
impl ChartHook for ScriptedCharts {
    async fn render_charts(&self) {
        for chart in &self.charts {
            tracing::debug!(chart = %chart.id, "rendering chart");
            let _ = self
                .events_tx
                .send(Event::ChartRendered {
                    chart: chart.clone(),
                })
                .await;
        }
    }
}
