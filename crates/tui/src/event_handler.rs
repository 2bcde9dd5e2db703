//! Event handling utilities for the TUI.
//!
//! This module provides functions for handling different types of events:
//! - Core events (from sk-core)
//! - Keyboard events (user input)

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use sk_protocol::ipc::{Event, Op};
use sk_protocol::run_models::{RunStatus, StageStatus};
use tokio::sync::mpsc::Sender;

use crate::event::EventStatus;
use crate::view::{FileInfo, ScenarioView};
use crate::widgets::{CommandComposer, LogView};

/// Apply an event received from the core to the view.
pub fn handle_core_event(view: &mut ScenarioView, log_view: &mut LogView, event: Event) {
    match event {
        Event::FileLoaded {
            file_name,
            size_bytes,
            row_count,
            headers,
        } => {
            view.file = Some(FileInfo {
                name: file_name,
                size_bytes,
                row_count,
                headers,
            });
            view.notice = None;
        }
        Event::RunStarted { .. } => {
            view.reset_for_run();
            log_view.follow();
        }
        Event::StageActivated { step_index, .. } => {
            if let Some(status) = view.stage_status.get_mut(step_index) {
                *status = StageStatus::Active;
            }
        }
        Event::StageCompleted { step_index, .. } => {
            if let Some(status) = view.stage_status.get_mut(step_index) {
                *status = StageStatus::Completed;
            }
        }
        Event::ConnectorCompleted {
            connector_index, ..
        } => {
            if let Some(connector) = view.connectors.get_mut(connector_index) {
                *connector = true;
            }
        }
        Event::LogAppended { entry, .. } => {
            view.log.push(entry);
        }
        Event::RunCompleted { .. } => {
            view.status = RunStatus::Complete;
        }
        Event::ResultsRevealed { .. } => {
            view.results_visible = true;
        }
        Event::MetricUpdated {
            target_id,
            display,
            counting,
            ..
        } => {
            if let Some(metric) = view.metric_mut(&target_id) {
                metric.display = display;
                metric.counting = counting;
            }
        }
        Event::InsightRevealed { index, .. } => {
            if let Some(insight) = view.insights.get_mut(index) {
                insight.visible = true;
            }
        }
        Event::ChartRendered { chart } => {
            view.charts.retain(|c| c.id != chart.id);
            view.charts.push(chart);
        }
    }
}

/// Handle a keyboard event from the user.
///
/// The command composer sees the key first; anything it does not consume
/// falls through to the global bindings.
///
/// Returns `true` if the application should exit, `false` otherwise.
pub fn handle_keyboard_event(
    key_event: KeyEvent,
    composer: &mut CommandComposer,
    log_view: &mut LogView,
    view: &mut ScenarioView,
    op_tx: &Sender<Op>,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if composer.handle_key_event(key_event) == EventStatus::Consumed {
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Enter => {
            if composer.input().trim().is_empty() {
                send_op(Op::StartProcessing, view, op_tx);
            } else {
                submit_command(composer, view, op_tx);
            }
        }
        KeyCode::Up => log_view.scroll_up(),
        KeyCode::Down => log_view.scroll_down(),
        KeyCode::PageUp => log_view.page_up(),
        KeyCode::PageDown => log_view.page_down(),
        KeyCode::Home => log_view.scroll_to_top(),
        KeyCode::End => log_view.follow(),
        _ => {}
    }

    false
}

/// Submit the current command input.
fn submit_command(composer: &mut CommandComposer, view: &mut ScenarioView, op_tx: &Sender<Op>) {
    match composer.parse_command() {
        Ok(Some(op)) => send_op(op, view, op_tx),
        Ok(None) => {}
        Err(message) => view.notice = Some(message),
    }
    composer.clear();
}

fn send_op(op: Op, view: &mut ScenarioView, op_tx: &Sender<Op>) {
    if matches!(op, Op::StartProcessing) && !view.can_start() {
        view.notice = Some(if view.file.is_none() {
            "Load a CSV file first: /load <path>".to_string()
        } else {
            "Already processing".to_string()
        });
        return;
    }

    if op_tx.try_send(op).is_err() {
        view.notice = Some("Core is not responding".to_string());
    }
}
