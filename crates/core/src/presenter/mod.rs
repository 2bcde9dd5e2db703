//! Results presenter.
//!
//! Reveals the results panel once the pipeline finished: metric counters
//! start one after another and count up with an ease-out-quartic curve,
//! insight cards appear in sequence, and the chart hook draws the charts.

pub mod animation;
pub mod charts;

use crate::engine::pacing::Pacer;
use animation::CounterAnimation;
use charts::ChartHook;
use sk_protocol::ipc::Event;
use sk_protocol::run_models::MetricReading;
use sk_protocol::scenario_models::ScenarioScript;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinSet;
use uuid::Uuid;

/// Offset between the start of two consecutive metric counters.
pub const METRIC_STAGGER_MS: u64 = 400;

/// Offset between two consecutive insight reveals.
pub const INSIGHT_STAGGER_MS: u64 = 300;

enum Reveal {
    Metric(usize, MetricReading),
    Insight,
}

pub struct ResultsPresenter {
    pacer: Pacer,
    events_tx: Sender<Event>,
}

impl ResultsPresenter {
    pub fn new(pacer: Pacer, events_tx: Sender<Event>) -> Self {
        Self { pacer, events_tx }
    }

    /// Show the results of `script`.
    ///
    /// Metric `k` starts `k * 400` ms after the panel is revealed and insight
    /// `j` appears after `j * 300` ms. The chart hook, when given, is called
    /// once after every counter has been scheduled.
    ///
    /// # Returns
    ///
    /// Final metric readings in script order, once every animation finished.
    pub async fn present(
        &self,
        run_id: Uuid,
        script: &ScenarioScript,
        chart_hook: Option<&dyn ChartHook>,
    ) -> Vec<MetricReading> {
        let _ = self.events_tx.send(Event::ResultsRevealed { run_id }).await;
        tracing::debug!(
            %run_id,
            metrics = script.metrics.len(),
            insights = script.insights.len(),
            "results revealed"
        );

        let mut reveals = JoinSet::new();

        for (index, metric) in script.metrics.iter().enumerate() {
            let pacer = self.pacer;
            let events_tx = self.events_tx.clone();
            let animation = CounterAnimation::new(metric.clone());
            reveals.spawn(async move {
                pacer.delay(index as u64 * METRIC_STAGGER_MS).await;
                let reading = animation.play(run_id, pacer, events_tx).await;
                Reveal::Metric(index, reading)
            });
        }

        for index in 0..script.insights.len() {
            let pacer = self.pacer;
            let events_tx = self.events_tx.clone();
            reveals.spawn(async move {
                pacer.delay(index as u64 * INSIGHT_STAGGER_MS).await;
                let _ = events_tx
                    .send(Event::InsightRevealed { run_id, index })
                    .await;
                Reveal::Insight
            });
        }

        if let Some(hook) = chart_hook {
            hook.render_charts().await;
        }

        let mut readings: Vec<(usize, MetricReading)> = Vec::with_capacity(script.metrics.len());
        while let Some(joined) = reveals.join_next().await {
            match joined {
                Ok(Reveal::Metric(index, reading)) => readings.push((index, reading)),
                Ok(Reveal::Insight) => {}
                Err(e) => tracing::warn!(%run_id, "results animation task failed: {e}"),
            }
        }

        readings.sort_by_key(|(index, _)| *index);
        readings.into_iter().map(|(_, reading)| reading).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sk_protocol::scenario_models::MetricSpec;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    struct CountingHook {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChartHook for CountingHook {
        async fn render_charts(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn metric(id: &str, end: f64, prefix: &str, suffix: &str) -> MetricSpec {
        MetricSpec {
            target_id: id.to_string(),
            start: 0.0,
            end,
            suffix: suffix.to_string(),
            prefix: prefix.to_string(),
        }
    }

    fn create_test_script() -> ScenarioScript {
        ScenarioScript {
            id: "test".to_string(),
            name: "Test Agent".to_string(),
            steps: vec!["Only".to_string()],
            log_messages: vec![],
            metrics: vec![
                metric("metricAccuracy", 96.8, "", "%"),
                metric("metricRevenue", 18.5, "₹", "Cr"),
                metric("metricFillRate", 94.2, "", "%"),
            ],
            insights: vec![
                "Weekend sales 34% higher".to_string(),
                "Festive demand peaks in October".to_string(),
            ],
            charts: vec![],
        }
    }

    /// Collects events together with the paused-clock time they arrived at.
    async fn drain_timed(mut rx: mpsc::Receiver<Event>, start: Instant) -> Vec<(Duration, Event)> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push((start.elapsed(), event));
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn test_present_returns_final_readings_in_order() {
        let (tx, rx) = mpsc::channel(64);
        let collector = tokio::spawn(drain_timed(rx, Instant::now()));
        let presenter = ResultsPresenter::new(Pacer::default(), tx);

        let readings = presenter
            .present(Uuid::new_v4(), &create_test_script(), None)
            .await;
        drop(presenter);

        let displays: Vec<&str> = readings.iter().map(|r| r.display.as_str()).collect();
        assert_eq!(displays, vec!["96.8%", "₹18.5Cr", "94.2%"]);

        let events = collector.await.unwrap();
        assert!(matches!(events.first(), Some((_, Event::ResultsRevealed { .. }))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_metric_and_insight_stagger() {
        let (tx, rx) = mpsc::channel(64);
        let collector = tokio::spawn(drain_timed(rx, Instant::now()));
        let presenter = ResultsPresenter::new(Pacer::default(), tx);

        presenter
            .present(Uuid::new_v4(), &create_test_script(), None)
            .await;
        drop(presenter);

        let events = collector.await.unwrap();

        let mut first_frame: HashMap<String, Duration> = HashMap::new();
        for (at, event) in &events {
            if let Event::MetricUpdated { target_id, .. } = event {
                first_frame.entry(target_id.clone()).or_insert(*at);
            }
        }
        assert!(first_frame["metricAccuracy"] < Duration::from_millis(10));
        assert!(first_frame["metricRevenue"] >= Duration::from_millis(400));
        assert!(first_frame["metricRevenue"] < Duration::from_millis(410));
        assert!(first_frame["metricFillRate"] >= Duration::from_millis(800));
        assert!(first_frame["metricFillRate"] < Duration::from_millis(810));

        let insights: Vec<(Duration, usize)> = events
            .iter()
            .filter_map(|(at, e)| match e {
                Event::InsightRevealed { index, .. } => Some((*at, *index)),
                _ => None,
            })
            .collect();
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].1, 0);
        assert_eq!(insights[1].1, 1);
        assert!(insights[1].0 >= Duration::from_millis(300));
        assert!(insights[1].0 < Duration::from_millis(310));

        // Final frame of the last counter lands at 800 + 1500 ms.
        let last_final = events
            .iter()
            .filter(|(_, e)| matches!(e, Event::MetricUpdated { counting: false, .. }))
            .map(|(at, _)| *at)
            .max()
            .unwrap();
        assert!(last_final >= Duration::from_millis(2300));
        assert!(last_final < Duration::from_millis(2340));
    }

    #[tokio::test(start_paused = true)]
    async fn test_chart_hook_called_once() {
        let (tx, rx) = mpsc::channel(64);
        let collector = tokio::spawn(drain_timed(rx, Instant::now()));
        let presenter = ResultsPresenter::new(Pacer::default(), tx);
        let hook = CountingHook {
            calls: AtomicUsize::new(0),
        };

        presenter
            .present(Uuid::new_v4(), &create_test_script(), Some(&hook))
            .await;
        drop(presenter);
        let _ = collector.await;

        assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_results_panel() {
        let (tx, mut rx) = mpsc::channel(8);
        let presenter = ResultsPresenter::new(Pacer::instant(), tx);
        let mut script = create_test_script();
        script.metrics.clear();
        script.insights.clear();

        let readings = presenter.present(Uuid::new_v4(), &script, None).await;
        drop(presenter);

        assert!(readings.is_empty());
        assert!(matches!(rx.recv().await, Some(Event::ResultsRevealed { .. })));
        assert!(rx.recv().await.is_none());
    }
}
