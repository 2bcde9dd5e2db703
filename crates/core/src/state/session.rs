//! Session controller for one demo agent.
//!
//! The AgentSession is owned by the hosting front-end. It holds the scenario
//! script, the pipeline state, the accepted table and the live log, and turns
//! front-end operations into timed runs.

use crate::engine::pacing::Pacer;
use crate::engine::sink::LogSink;
use crate::engine::PipelineRunner;
use crate::intake::{self, error::IntakeResult, SelectedFile};
use crate::presenter::charts::ChartHook;
use crate::presenter::ResultsPresenter;
use crate::state::pipeline::{finish_processing, try_begin_run};
use sk_protocol::ipc::{Event, Op};
use sk_protocol::run_models::{LogEntry, PipelineState, RunReport};
use sk_protocol::scenario_models::ScenarioScript;
use sk_protocol::table_models::ParsedTable;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

/// Pause between the last completed stage and the results panel.
pub const RESULTS_DELAY_MS: u64 = 500;

/// Drives one scenario from file selection to presented results.
///
/// At most one run is active at a time. A run can be started again once the
/// previous one has presented its results.
pub struct AgentSession {
    script: Arc<ScenarioScript>,
    pacer: Pacer,

    /// Shared with the spawned run task.
    state: Arc<Mutex<PipelineState>>,

    /// `None` until a file passed intake.
    table: Arc<Mutex<Option<ParsedTable>>>,

    sink: LogSink,
    chart_hook: Option<Arc<dyn ChartHook>>,
    events_tx: mpsc::Sender<Event>,
}

impl AgentSession {
    /// Create a new AgentSession.
    ///
    /// # Arguments
    ///
    /// * `script` - The scenario played by every run
    /// * `pacer` - Timing source for all scripted delays
    /// * `events_tx` - Channel for sending events to the front-end
    pub fn new(script: Arc<ScenarioScript>, pacer: Pacer, events_tx: mpsc::Sender<Event>) -> Self {
        Self {
            script,
            pacer,
            state: Arc::new(Mutex::new(PipelineState::default())),
            table: Arc::new(Mutex::new(None)),
            sink: LogSink::new(events_tx.clone()),
            chart_hook: None,
            events_tx,
        }
    }

    /// Attach the hook called once the results panel is visible.
    pub fn with_chart_hook(mut self, hook: Arc<dyn ChartHook>) -> Self {
        self.chart_hook = Some(hook);
        self
    }

    pub fn script(&self) -> &ScenarioScript {
        &self.script
    }

    /// Offer a file to intake.
    ///
    /// An accepted file replaces the previous table and makes the session
    /// ready to start. A rejected file leaves everything as it was.
    pub async fn select_file(&self, path: &Path) -> IntakeResult<()> {
        let SelectedFile { table, size_bytes } = match intake::select_file(path).await {
            Ok(selected) => selected,
            Err(e) => {
                tracing::warn!("file rejected: {e}");
                return Err(e);
            }
        };

        let row_count = table.row_count();
        let headers = table.headers.clone();

        *self.table.lock().await = Some(table);
        tracing::info!("CSV loaded: {row_count} rows");

        let _ = self
            .events_tx
            .send(Event::FileLoaded {
                file_name: intake::display_name(path),
                size_bytes,
                row_count,
                headers,
            })
            .await;

        Ok(())
    }

    /// Start a run in the background.
    ///
    /// # Returns
    ///
    /// A handle resolving to the run's report, or `None` when a run is
    /// already active or no file has been accepted yet.
    pub async fn start_processing(&self) -> Option<JoinHandle<RunReport>> {
        let has_table = self.table.lock().await.is_some();
        let run_id = {
            let mut state = self.state.lock().await;
            try_begin_run(&mut state, has_table)
        };

        let Some(run_id) = run_id else {
            tracing::debug!(has_table, "start ignored");
            return None;
        };

        tracing::info!(%run_id, scenario = %self.script.id, "run started");
        let _ = self
            .events_tx
            .send(Event::RunStarted {
                run_id,
                scenario_name: self.script.name.clone(),
            })
            .await;
        self.sink.begin_run(run_id).await;

        let script = Arc::clone(&self.script);
        let state = Arc::clone(&self.state);
        let sink = self.sink.clone();
        let chart_hook = self.chart_hook.clone();
        let pacer = self.pacer;
        let runner = PipelineRunner::new(pacer, self.events_tx.clone());
        let presenter = ResultsPresenter::new(pacer, self.events_tx.clone());

        Some(tokio::spawn(async move {
            runner.run(run_id, &script, &sink, &state).await;

            pacer.delay(RESULTS_DELAY_MS).await;
            let metrics = presenter
                .present(run_id, &script, chart_hook.as_deref())
                .await;

            finish_processing(&mut *state.lock().await);
            tracing::info!(%run_id, "run finished");

            RunReport {
                run_id,
                entries: sink.entries().await,
                metrics,
            }
        }))
    }

    /// Apply one front-end operation.
    ///
    /// # Returns
    ///
    /// `false` once the front-end asked to shut down.
    pub async fn handle_op(&self, op: Op) -> bool {
        match op {
            Op::SelectFile { path } => {
                let _ = self.select_file(&path).await;
                true
            }
            Op::StartProcessing => {
                // Runs are detached; progress arrives as events.
                let _ = self.start_processing().await;
                true
            }
            Op::Shutdown => false,
        }
    }

    /// Serve operations until `Shutdown` or until every sender is dropped.
    pub async fn serve(&self, mut op_rx: mpsc::Receiver<Op>) {
        while let Some(op) = op_rx.recv().await {
            if !self.handle_op(op).await {
                break;
            }
        }
        tracing::debug!("session stopped serving operations");
    }

    pub async fn state(&self) -> PipelineState {
        self.state.lock().await.clone()
    }

    pub async fn table(&self) -> Option<ParsedTable> {
        self.table.lock().await.clone()
    }

    pub async fn log_entries(&self) -> Vec<LogEntry> {
        self.sink.entries().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sk_protocol::run_models::RunStatus;
    use sk_protocol::scenario_models::{LogMessage, LogTag, MetricSpec};
    use std::time::Duration;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_script() -> Arc<ScenarioScript> {
        Arc::new(ScenarioScript {
            id: "test".to_string(),
            name: "Test Agent".to_string(),
            steps: vec!["Ingest".to_string(), "Report".to_string()],
            log_messages: vec![LogMessage {
                step_index: 0,
                tag: LogTag::Data,
                text: "Loading CSV data".to_string(),
                delay_ms: None,
            }],
            metrics: vec![],
            insights: vec![],
            charts: vec![],
        })
    }

    fn write_csv(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("sales.csv");
        fs::write(&path, "a,b\n1,2\n3,4\n").unwrap();
        path
    }

    #[tokio::test]
    async fn test_start_without_file_is_ignored() {
        let (tx, _rx) = mpsc::channel(100);
        let session = AgentSession::new(create_test_script(), Pacer::instant(), tx);

        assert!(session.start_processing().await.is_none());
        assert_eq!(session.state().await.status, RunStatus::Idle);
    }

    #[tokio::test]
    async fn test_select_file_emits_file_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(&temp_dir);
        let (tx, mut rx) = mpsc::channel(100);
        let session = AgentSession::new(create_test_script(), Pacer::instant(), tx);

        session.select_file(&path).await.unwrap();

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event,
            Event::FileLoaded { ref file_name, row_count: 2, size_bytes: 12, .. } if file_name == "sales.csv"
        ));
        assert_eq!(session.table().await.unwrap().row_count(), 2);
    }

    #[tokio::test]
    async fn test_rejected_file_keeps_previous_table() {
        let temp_dir = TempDir::new().unwrap();
        let csv = write_csv(&temp_dir);
        let other = temp_dir.path().join("notes.txt");
        fs::write(&other, "x").unwrap();
        let (tx, _rx) = mpsc::channel(100);
        let session = AgentSession::new(create_test_script(), Pacer::instant(), tx);

        session.select_file(&csv).await.unwrap();
        assert!(session.select_file(&other).await.is_err());

        assert_eq!(session.table().await.unwrap().headers, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_second_start_while_running_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(&temp_dir);
        let (tx, mut rx) = mpsc::channel(100);
        let collector = tokio::spawn(async move { while rx.recv().await.is_some() {} });
        let session = AgentSession::new(create_test_script(), Pacer::default(), tx);
        session.select_file(&path).await.unwrap();

        let first = session.start_processing().await;
        let second = session.start_processing().await;

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(session.state().await.is_processing);

        first.unwrap().abort();
        drop(session);
        collector.abort();
    }

    #[tokio::test]
    async fn test_run_report_and_rerun() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(&temp_dir);
        let (tx, mut rx) = mpsc::channel(100);
        let collector = tokio::spawn(async move { while rx.recv().await.is_some() {} });
        let session = AgentSession::new(create_test_script(), Pacer::instant(), tx);
        session.select_file(&path).await.unwrap();

        let report = session.start_processing().await.unwrap().await.unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].text, "Loading CSV data");

        let state = session.state().await;
        assert_eq!(state.status, RunStatus::Complete);
        assert!(!state.is_processing);

        // The log starts over on a second run.
        let again = session.start_processing().await.unwrap().await.unwrap();
        assert_ne!(again.run_id, report.run_id);
        assert_eq!(session.log_entries().await.len(), 1);

        drop(session);
        let _ = collector.await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_during_counter_animation_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_csv(&temp_dir);
        let mut script = (*create_test_script()).clone();
        script.metrics = vec![MetricSpec {
            target_id: "metricAccuracy".to_string(),
            start: 0.0,
            end: 96.8,
            suffix: "%".to_string(),
            prefix: String::new(),
        }];
        let (tx, mut rx) = mpsc::channel(1000);
        let collector = tokio::spawn(async move { while rx.recv().await.is_some() {} });
        let session = AgentSession::new(Arc::new(script), Pacer::default(), tx);
        session.select_file(&path).await.unwrap();

        let first = session.start_processing().await.unwrap();

        // Stages end at 2000 ms and results appear at 2500 ms; the counter
        // runs until about 4000 ms.
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(session.state().await.status, RunStatus::Complete);
        assert!(session.state().await.is_processing);
        assert!(session.start_processing().await.is_none());

        first.await.unwrap();
        assert!(!session.state().await.is_processing);
        let second = session.start_processing().await;
        assert!(second.is_some());

        second.unwrap().abort();
        drop(session);
        collector.abort();
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let (tx, _rx) = mpsc::channel(100);
        let session = AgentSession::new(create_test_script(), Pacer::instant(), tx);
        let (op_tx, op_rx) = mpsc::channel(10);

        op_tx.send(Op::StartProcessing).await.unwrap();
        op_tx.send(Op::Shutdown).await.unwrap();

        session.serve(op_rx).await;
        assert_eq!(session.state().await.status, RunStatus::Idle);
    }
}
