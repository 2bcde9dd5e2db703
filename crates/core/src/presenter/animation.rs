//! Metric counter animation.

use crate::engine::pacing::Pacer;
use sk_protocol::ipc::Event;
use sk_protocol::run_models::MetricReading;
use sk_protocol::scenario_models::MetricSpec;
use tokio::sync::mpsc::Sender;
use tokio::time::Instant;
use uuid::Uuid;

/// Length of every counter animation.
pub const COUNTER_DURATION_MS: u64 = 1500;

/// One display refresh at 60 Hz.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Ease-out quartic: fast start, gentle landing. `t` is clamped to `[0, 1]`.
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Counts a metric display from its start to its end value.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    spec: MetricSpec,
}

impl CounterAnimation {
    pub fn new(spec: MetricSpec) -> Self {
        Self { spec }
    }

    /// Value displayed at progress `t` (elapsed / duration).
    pub fn value_at(&self, t: f64) -> f64 {
        let eased = ease_out_quart(t);
        self.spec.start + (self.spec.end - self.spec.start) * eased
    }

    /// Decorated text displayed at progress `t`.
    pub fn display_at(&self, t: f64) -> String {
        self.spec.format_value(self.value_at(t))
    }

    /// Run the animation, emitting one update per frame.
    ///
    /// The last frame shows exactly `prefix + end + suffix` and clears the
    /// counting state.
    pub async fn play(self, run_id: Uuid, pacer: Pacer, events_tx: Sender<Event>) -> MetricReading {
        let duration = pacer.scaled(COUNTER_DURATION_MS);
        let started = Instant::now();

        loop {
            let t = if duration.is_zero() {
                1.0
            } else {
                (started.elapsed().as_secs_f64() / duration.as_secs_f64()).min(1.0)
            };

            let finished = t >= 1.0;
            let display = if finished {
                self.spec.format_value(self.spec.end)
            } else {
                self.display_at(t)
            };

            let _ = events_tx
                .send(Event::MetricUpdated {
                    run_id,
                    target_id: self.spec.target_id.clone(),
                    display: display.clone(),
                    counting: !finished,
                })
                .await;

            if finished {
                return MetricReading {
                    target_id: self.spec.target_id,
                    value: self.spec.end,
                    display,
                };
            }

            pacer.delay(FRAME_INTERVAL_MS).await;
        }
    }
}
