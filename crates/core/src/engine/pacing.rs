//! Timed delay primitive.
//!
//! Every pause of a scenario run (message delays, stage completion, results
//! staggering, animation frames) goes through a [`Pacer`].

use std::time::Duration;

/// Largest accepted time scale; a 100x slower demo is already unwatchable.
pub const MAX_TIME_SCALE: f64 = 100.0;

/// Suspends the current task for scripted durations.
///
/// Durations are multiplied by `time_scale`; `1.0` keeps scripted timings,
/// `0.0` makes every delay return immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacer {
    time_scale: f64,
}

impl Pacer {
    /// Create a pacer. Negative or non-finite scales are treated as `1.0`,
    /// scales above [`MAX_TIME_SCALE`] are clamped to it.
    pub fn new(time_scale: f64) -> Self {
        let time_scale = if time_scale.is_finite() && time_scale >= 0.0 {
            time_scale.min(MAX_TIME_SCALE)
        } else {
            1.0
        };
        Self { time_scale }
    }

    /// A pacer that never waits.
    pub fn instant() -> Self {
        Self { time_scale: 0.0 }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// The real duration of a scripted delay, saturating at [`Duration::MAX`].
    pub fn scaled(&self, ms: u64) -> Duration {
        Duration::try_from_secs_f64(ms as f64 * self.time_scale / 1000.0).unwrap_or(Duration::MAX)
    }

    /// Suspend for `ms` scripted milliseconds.
    pub async fn delay(&self, ms: u64) {
        let duration = self.scaled(ms);
        if duration.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(duration).await;
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}
