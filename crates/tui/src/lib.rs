//! # sk-tui
//!
//! Terminal User Interface for showcase-kit.
//!
//! This crate plays one scenario interactively: the stage row, the live log
//! and the results panel are drawn from the events of an `sk-core`
//! [`AgentSession`], driven through the `Op` and `Event` protocol defined in
//! `sk-protocol`.

pub mod app;
pub mod event;
pub mod event_handler;
pub mod tui;
pub mod view;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

use anyhow::Result;
use sk_core::config::loader::load_config;
use sk_core::engine::pacing::Pacer;
use sk_core::logging::{self, LogTarget};
use sk_core::presenter::charts::ScriptedCharts;
use sk_core::state::session::AgentSession;
use sk_protocol::ipc::Op;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// File the TUI writes diagnostics to, since it owns the terminal.
pub const LOG_FILE_NAME: &str = "showcase-kit.log";

/// Channel capacity for ops and events. Counter frames are frequent.
const CHANNEL_CAPACITY: usize = 256;

/// How the interactive session is started.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Project root containing an optional `.showcase-kit/` directory.
    pub root: PathBuf,
    /// Scenario id; falls back to the configured default.
    pub scenario: Option<String>,
    /// CSV file offered to intake before the first frame.
    pub file: Option<PathBuf>,
    /// Overrides the configured time scale.
    pub time_scale: Option<f64>,
}

/// Load the configuration, start a session and run the TUI until the user quits.
pub async fn run_app(options: AppOptions) -> Result<()> {
    if let Err(e) = logging::init(LogTarget::File(std::env::temp_dir().join(LOG_FILE_NAME))) {
        eprintln!("diagnostic logging disabled: {e:#}");
    }

    let config = load_config(&options.root).await?;
    let script = Arc::new(config.select_scenario(options.scenario.as_deref())?.clone());
    let pacer = Pacer::new(options.time_scale.unwrap_or(config.global.time_scale));
    tracing::info!("opening scenario {}", script.id);

    let (op_tx, op_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let charts = ScriptedCharts::new(script.charts.clone(), event_tx.clone());
    let session =
        AgentSession::new(Arc::clone(&script), pacer, event_tx).with_chart_hook(Arc::new(charts));
    let session_handle = tokio::spawn(async move { session.serve(op_rx).await });

    if let Some(path) = options.file {
        let _ = op_tx.send(Op::SelectFile { path }).await;
    }

    let mut app = App::new(&script, op_tx.clone(), event_rx);
    let result = match Tui::init() {
        Ok(mut tui) => {
            let result = app.run(&mut tui).await;
            tui.restore()?;
            result
        }
        Err(e) => Err(e),
    };

    let _ = op_tx.send(Op::Shutdown).await;
    // A run still in flight is abandoned with the process.
    session_handle.abort();

    result
}
