//! Pipeline state machine.
//!
//! Functions for moving a [`PipelineState`] through one run and emitting the
//! matching stage events.

use sk_protocol::ipc::Event;
use sk_protocol::run_models::{PipelineState, RunStatus};
use tokio::sync::mpsc::Sender;
use uuid::Uuid;

/// Start a new run unless one is active or no file has been accepted.
///
/// # Returns
///
/// The new run id, or `None` when the start must be ignored.
pub fn try_begin_run(state: &mut PipelineState, has_table: bool) -> Option<Uuid> {
    if state.is_processing || !has_table {
        return None;
    }

    let run_id = Uuid::new_v4();
    state.run_id = Some(run_id);
    state.current_step_index = 0;
    state.is_processing = true;
    state.status = RunStatus::Processing;
    Some(run_id)
}

/// Mark stage `step_index` active and emit the event.
pub async fn activate_stage(
    state: &mut PipelineState,
    run_id: Uuid,
    step_index: usize,
    events_tx: &Sender<Event>,
) {
    state.current_step_index = step_index;
    let _ = events_tx
        .send(Event::StageActivated { run_id, step_index })
        .await;
}

/// Mark stage `step_index` completed, then the connector leading to the
/// next stage when there is one.
pub async fn complete_stage(
    run_id: Uuid,
    step_index: usize,
    step_count: usize,
    events_tx: &Sender<Event>,
) {
    let _ = events_tx
        .send(Event::StageCompleted { run_id, step_index })
        .await;

    if step_index + 1 < step_count {
        let _ = events_tx
            .send(Event::ConnectorCompleted {
                run_id,
                connector_index: step_index,
            })
            .await;
    }
}

/// Flip the status indicator to complete.
pub async fn complete_run(state: &mut PipelineState, run_id: Uuid, events_tx: &Sender<Event>) {
    state.status = RunStatus::Complete;
    let _ = events_tx.send(Event::RunCompleted { run_id }).await;
}

/// Release the re-entrancy guard once results have been presented.
pub fn finish_processing(state: &mut PipelineState) {
    state.is_processing = false;
}
