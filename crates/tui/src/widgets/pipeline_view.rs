//! Header and stage row widgets.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sk_core::format::format_file_size;
use sk_protocol::run_models::{RunStatus, StageStatus};

use crate::view::ScenarioView;

/// Renders the scenario name, the loaded file and the status indicator.
pub fn render_header(frame: &mut Frame, area: Rect, view: &ScenarioView) {
    let (status_text, status_style) = status_label(view.status);

    let file_text = match &view.file {
        Some(file) => format!(
            "{} ({}, {} rows)",
            file.name,
            format_file_size(file.size_bytes),
            file.row_count
        ),
        None => "no file loaded".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            view.scenario_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::raw(file_text),
        Span::raw("  |  "),
        Span::styled(status_text, status_style),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Renders every stage with its icon, joined by connectors.
///
/// `○` pending, `◉` active, `●` completed; a connector turns solid once the
/// stage before it completed.
pub fn render_pipeline(frame: &mut Frame, area: Rect, view: &ScenarioView) {
    let mut spans = Vec::with_capacity(view.stages.len() * 2);

    for (i, name) in view.stages.iter().enumerate() {
        let status = view.stage_status.get(i).copied().unwrap_or_default();
        let (icon, style) = match status {
            StageStatus::Pending => ("○", Style::default().fg(Color::DarkGray)),
            StageStatus::Active => (
                "◉",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            StageStatus::Completed => ("●", Style::default().fg(Color::Green)),
        };
        spans.push(Span::styled(format!("{icon} {name}"), style));

        if let Some(filled) = view.connectors.get(i) {
            let connector = if *filled {
                Span::styled(" ━━ ", Style::default().fg(Color::Green))
            } else {
                Span::styled(" ── ", Style::default().fg(Color::DarkGray))
            };
            spans.push(connector);
        }
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Pipeline"));
    frame.render_widget(paragraph, area);
}

fn status_label(status: RunStatus) -> (String, Style) {
    match status {
        RunStatus::Idle => ("Ready".to_string(), Style::default().fg(Color::Gray)),
        RunStatus::Processing => (
            "Processing...".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        RunStatus::Complete => (
            "Analysis complete".to_string(),
            Style::default().fg(Color::Green),
        ),
    }
}
