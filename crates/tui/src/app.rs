//! TUI application state and event loop.
//!
//! This module defines the main `App` struct that mirrors the session's
//! events into a [`ScenarioView`] and runs the event loop using
//! `tokio::select!`.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use sk_protocol::ipc::{Event, Op};
use sk_protocol::scenario_models::ScenarioScript;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_stream::StreamExt;

use crate::event_handler;
use crate::tui::{Tui, TuiEvent};
use crate::view::ScenarioView;
use crate::widgets::{pipeline_view, results_view, CommandComposer, LogView};

/// Main TUI application state.
pub struct App {
    /// Everything drawn on screen, driven by core events.
    pub view: ScenarioView,
    pub composer: CommandComposer,
    pub log_view: LogView,
    /// Channel to send operations to the session.
    pub op_tx: Sender<Op>,
    /// Channel to receive events from the session.
    pub event_rx: Receiver<Event>,
    pub should_exit: bool,
}

impl App {
    /// Create a new App for `script` with communication channels.
    pub fn new(script: &ScenarioScript, op_tx: Sender<Op>, event_rx: Receiver<Event>) -> Self {
        Self {
            view: ScenarioView::new(script),
            composer: CommandComposer::new(),
            log_view: LogView::new(),
            op_tx,
            event_rx,
            should_exit: false,
        }
    }

    /// Main event loop.
    ///
    /// Uses `tokio::select!` to handle keyboard input and core events concurrently.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut tui_events = tui.event_stream();

        tui.frame_requester().schedule_frame();

        while !self.should_exit {
            select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_core_event(event);
                    tui.frame_requester().schedule_frame();
                }
                Some(tui_event) = tui_events.next() => {
                    self.handle_tui_event(tui, tui_event)?;
                }
            }
        }

        Ok(())
    }

    fn handle_core_event(&mut self, event: Event) {
        event_handler::handle_core_event(&mut self.view, &mut self.log_view, event);
    }

    fn handle_tui_event(&mut self, tui: &mut Tui, event: TuiEvent) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => {
                self.handle_key_event(key_event);
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Paste(pasted) => {
                for c in pasted.chars().filter(|c| !c.is_control()) {
                    self.composer.insert_char(c);
                }
                tui.frame_requester().schedule_frame();
            }
            TuiEvent::Draw => {
                tui.draw(|frame| {
                    self.render(frame);
                })?;
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        self.should_exit = event_handler::handle_keyboard_event(
            key_event,
            &mut self.composer,
            &mut self.log_view,
            &mut self.view,
            &self.op_tx,
        );
    }

    /// Render the TUI.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Stage row
                Constraint::Min(5),    // Log and results
                Constraint::Length(3), // Command input
            ])
            .split(area);

        pipeline_view::render_header(frame, chunks[0], &self.view);
        pipeline_view::render_pipeline(frame, chunks[1], &self.view);

        if self.view.results_visible {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(chunks[2]);
            self.log_view.render(frame, body[0], &self.view.log);
            results_view::render_results(frame, body[1], &self.view);
        } else {
            self.log_view.render(frame, chunks[2], &self.view.log);
        }

        self.composer
            .render(chunks[3], frame.buffer_mut(), self.view.notice.as_deref());

        if self.composer.should_show_popup() {
            let height = self.composer.suggestions().len() as u16 + 2;
            let popup = Rect {
                x: chunks[3].x,
                y: chunks[3].y.saturating_sub(height),
                width: chunks[3].width.min(60),
                height,
            };
            self.composer.render_popup(popup, frame.buffer_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use sk_protocol::run_models::LogEntry;
    use sk_protocol::scenario_models::{LogTag, MetricSpec};
    use tokio::sync::mpsc;
    use uuid::Uuid;

    fn create_test_script() -> ScenarioScript {
        ScenarioScript {
            id: "test".to_string(),
            name: "Inventory Optimization Agent".to_string(),
            steps: vec!["Data Ingestion".to_string(), "Stock Analysis".to_string()],
            log_messages: vec![],
            metrics: vec![MetricSpec {
                target_id: "metricStockouts".to_string(),
                start: 0.0,
                end: 73.0,
                suffix: "%".to_string(),
                prefix: String::new(),
            }],
            insights: vec![],
            charts: vec![],
        }
    }

    fn create_test_app() -> (App, mpsc::Receiver<Op>, mpsc::Sender<Event>) {
        let (op_tx, op_rx) = mpsc::channel(10);
        let (event_tx, event_rx) = mpsc::channel(10);
        (App::new(&create_test_script(), op_tx, event_rx), op_rx, event_tx)
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_app_renders_initial_screen() {
        let (mut app, _op_rx, _event_tx) = create_test_app();

        let content = render(&mut app);

        assert!(content.contains("Inventory Optimization Agent"));
        assert!(content.contains("no file loaded"));
        assert!(content.contains("Pipeline"));
        assert!(content.contains("○ Data Ingestion"));
        assert!(content.contains("Agent Log"));
        assert!(content.contains("Command"));
        assert!(!content.contains("Key Metrics"));
    }

    #[test]
    fn test_app_renders_run_progress_and_results() {
        let (mut app, _op_rx, _event_tx) = create_test_app();
        let run_id = Uuid::new_v4();

        for event in [
            Event::RunStarted {
                run_id,
                scenario_name: "Inventory Optimization Agent".to_string(),
            },
            Event::StageActivated { run_id, step_index: 0 },
            Event::LogAppended {
                run_id,
                entry: LogEntry {
                    timestamp: "09:15:02".to_string(),
                    tag: LogTag::Data,
                    text: "Loading inventory snapshot".to_string(),
                },
            },
            Event::StageCompleted { run_id, step_index: 0 },
            Event::ConnectorCompleted {
                run_id,
                connector_index: 0,
            },
            Event::StageActivated { run_id, step_index: 1 },
            Event::StageCompleted { run_id, step_index: 1 },
            Event::RunCompleted { run_id },
            Event::ResultsRevealed { run_id },
            Event::MetricUpdated {
                run_id,
                target_id: "metricStockouts".to_string(),
                display: "73.0%".to_string(),
                counting: false,
            },
        ] {
            app.handle_core_event(event);
        }

        let content = render(&mut app);

        assert!(content.contains("● Data Ingestion ━━ ● Stock Analysis"));
        assert!(content.contains("Loading inventory snapshot"));
        assert!(content.contains("Analysis complete"));
        assert!(content.contains("Key Metrics"));
        assert!(content.contains("Stockouts"));
        assert!(content.contains("73.0%"));
    }

    #[test]
    fn test_app_quit_on_q() {
        let (mut app, _op_rx, _event_tx) = create_test_app();

        assert!(!app.should_exit);
        app.handle_key_event(KeyEvent::from(KeyCode::Char('q')));
        assert!(app.should_exit);
    }

    #[test]
    fn test_popup_renders_while_typing_command() {
        let (mut app, _op_rx, _event_tx) = create_test_app();

        app.handle_key_event(KeyEvent::from(KeyCode::Char('/')));
        let content = render(&mut app);

        assert!(content.contains("Suggestions"));
        assert!(content.contains("/load <path>"));
    }

    #[test]
    fn test_notice_replaces_command_title() {
        let (mut app, mut op_rx, _event_tx) = create_test_app();

        app.handle_key_event(KeyEvent::from(KeyCode::Enter));
        let content = render(&mut app);

        assert!(op_rx.try_recv().is_err());
        assert!(content.contains("Load a CSV file first"));
    }
}
