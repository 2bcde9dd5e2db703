//! Live log widget with scrolling support.
//!
//! Shows the run's log entries with their timestamp and tag. While
//! following, the view stays pinned to the newest entry; scrolling up
//! detaches it until the user scrolls back to the bottom or presses End.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use sk_protocol::run_models::LogEntry;
use sk_protocol::scenario_models::LogTag;

/// Widget for displaying the live log.
#[derive(Debug, Clone)]
pub struct LogView {
    /// Number of lines scrolled from the top.
    pub scroll_offset: usize,
    following: bool,
    /// Visible lines and total lines at the last render.
    viewport_height: usize,
    total_lines: usize,
}

impl LogView {
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            following: true,
            viewport_height: 0,
            total_lines: 0,
        }
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport_height)
    }

    /// Render the log entries.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, entries: &[LogEntry]) {
        self.viewport_height = area.height.saturating_sub(2) as usize; // borders
        self.total_lines = entries.len();
        if self.following {
            self.scroll_offset = self.max_offset();
        }
        self.scroll_offset = self.scroll_offset.min(self.max_offset());

        let block = Block::default().borders(Borders::ALL).title("Agent Log");

        let lines: Vec<Line> = if entries.is_empty() {
            vec![Line::from(Span::styled(
                "Waiting for a run...",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            entries.iter().map(entry_line).collect()
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, area);

        if self.total_lines > self.viewport_height {
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(self.max_offset() + 1)
                .viewport_content_length(self.viewport_height)
                .position(self.scroll_offset);

            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    /// Scroll up by one line.
    pub fn scroll_up(&mut self) {
        self.following = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line; reaching the bottom resumes following.
    pub fn scroll_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + 1).min(self.max_offset());
        self.following = self.scroll_offset == self.max_offset();
    }

    pub fn page_up(&mut self) {
        self.following = false;
        self.scroll_offset = self
            .scroll_offset
            .saturating_sub(self.viewport_height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + self.viewport_height.max(1)).min(self.max_offset());
        self.following = self.scroll_offset == self.max_offset();
    }

    pub fn scroll_to_top(&mut self) {
        self.following = false;
        self.scroll_offset = 0;
    }

    /// Pin the view to the newest entry.
    pub fn follow(&mut self) {
        self.following = true;
        self.scroll_offset = self.max_offset();
    }
}

impl Default for LogView {
    fn default() -> Self {
        Self::new()
    }
}

fn tag_style(tag: LogTag) -> Style {
    let color = match tag {
        LogTag::Data => Color::Blue,
        LogTag::Model => Color::Magenta,
        LogTag::Analysis => Color::Yellow,
        LogTag::Insight => Color::Cyan,
        LogTag::Success => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn entry_line(entry: &LogEntry) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("[{}] ", entry.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{:<8} ", entry.tag.as_str()), tag_style(entry.tag)),
        Span::raw(entry.text.clone()),
    ])
}
