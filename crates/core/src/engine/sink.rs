//! Append-only live log.

use crate::format::timestamp_now;
use sk_protocol::ipc::Event;
use sk_protocol::run_models::LogEntry;
use sk_protocol::scenario_models::LogTag;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct SinkState {
    run_id: Uuid,
    entries: Vec<LogEntry>,
}

/// The visible log of a run.
///
/// Each append stamps the wall-clock time at append time, stores the entry
/// at the end of the log and emits [`Event::LogAppended`] so the front-end
/// can append it and scroll to it. Entries are never removed or reordered
/// while a run lasts; [`LogSink::begin_run`] starts a fresh log.
///
/// Cloning yields another handle to the same log.
#[derive(Debug, Clone)]
pub struct LogSink {
    state: Arc<Mutex<SinkState>>,
    events_tx: Sender<Event>,
}

impl LogSink {
    pub fn new(events_tx: Sender<Event>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SinkState::default())),
            events_tx,
        }
    }

    /// Clear the log and tag subsequent entries with `run_id`.
    pub async fn begin_run(&self, run_id: Uuid) {
        let mut state = self.state.lock().await;
        state.run_id = run_id;
        state.entries.clear();
    }

    /// Append one entry and notify the front-end.
    pub async fn append(&self, tag: LogTag, text: impl Into<String>) -> LogEntry {
        let entry = LogEntry {
            timestamp: timestamp_now(),
            tag,
            text: text.into(),
        };

        let run_id = {
            let mut state = self.state.lock().await;
            state.entries.push(entry.clone());
            state.run_id
        };

        let _ = self
            .events_tx
            .send(Event::LogAppended {
                run_id,
                entry: entry.clone(),
            })
            .await;

        entry
    }

    /// Snapshot of all entries in append order.
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.state.lock().await.entries.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
