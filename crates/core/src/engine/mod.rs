//! Step pipeline runner.
//!
//! The PipelineRunner plays a scenario script stage by stage: it activates
//! each stage, emits the stage's scripted log lines with their delays, waits
//! for the completion delay and marks the stage completed. It never reads
//! the uploaded table; every line it emits comes from the script.

pub mod pacing;
pub mod sink;

use crate::state::pipeline::{activate_stage, complete_run, complete_stage};
use pacing::Pacer;
use sink::LogSink;
use sk_protocol::ipc::Event;
use sk_protocol::run_models::PipelineState;
use sk_protocol::scenario_models::ScenarioScript;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Pause between a stage's last log line and its completion.
pub const STAGE_COMPLETION_DELAY_MS: u64 = 800;

/// Plays the stages of a scenario script in order.
///
/// Stages run strictly one after another; within a stage every message is
/// its own suspension point. A run cannot fail and cannot be cancelled.
pub struct PipelineRunner {
    pacer: Pacer,
    events_tx: Sender<Event>,
}

impl PipelineRunner {
    /// Create a new PipelineRunner.
    ///
    /// # Arguments
    ///
    /// * `pacer` - Timing source for every scripted delay
    /// * `events_tx` - Channel for stage and status events
    pub fn new(pacer: Pacer, events_tx: Sender<Event>) -> Self {
        Self { pacer, events_tx }
    }

    /// Play every stage of `script`, returning once the last stage completed
    /// and the status indicator reads complete.
    ///
    /// Presenting the results is left to the caller.
    pub async fn run(
        &self,
        run_id: Uuid,
        script: &ScenarioScript,
        sink: &LogSink,
        state: &Mutex<PipelineState>,
    ) {
        let step_count = script.steps.len();

        for (step_index, step_name) in script.steps.iter().enumerate() {
            tracing::debug!(%run_id, step_index, step = %step_name, "stage activated");
            {
                let mut state = state.lock().await;
                activate_stage(&mut state, run_id, step_index, &self.events_tx).await;
            }

            for message in script.messages_for_step(step_index) {
                self.pacer.delay(message.effective_delay_ms()).await;
                sink.append(message.tag, message.text.clone()).await;
            }

            self.pacer.delay(STAGE_COMPLETION_DELAY_MS).await;
            complete_stage(run_id, step_index, step_count, &self.events_tx).await;
        }

        let mut state = state.lock().await;
        complete_run(&mut state, run_id, &self.events_tx).await;
        tracing::debug!(%run_id, "pipeline complete");
    }
}
