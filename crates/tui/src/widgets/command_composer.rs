//! Command composer widget with slash command autocomplete.
//!
//! This widget provides a text input field for entering commands, with
//! autocomplete suggestions when the user types a slash command.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use sk_protocol::ipc::Op;
use std::path::PathBuf;

use crate::event::EventStatus;

/// Available slash commands with their descriptions.
const COMMANDS: &[(&str, &str)] = &[
    ("/load <path>", "Select a CSV file"),
    ("/start", "Start the agent pipeline"),
];

/// Command composer state.
#[derive(Debug, Clone, Default)]
pub struct CommandComposer {
    input: String,
    /// Cursor position in characters.
    cursor_pos: usize,
    show_popup: bool,
    /// Selected index in the autocomplete list.
    selected_index: usize,
}

impl CommandComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn should_show_popup(&self) -> bool {
        self.show_popup && !self.suggestions().is_empty()
    }

    /// Get filtered command suggestions based on current input.
    pub fn suggestions(&self) -> Vec<(&'static str, &'static str)> {
        if !self.input.starts_with('/') {
            return Vec::new();
        }

        let filter = self.input.trim();
        COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(filter))
            .copied()
            .collect()
    }

    pub fn selected_suggestion(&self) -> Option<(&'static str, &'static str)> {
        self.suggestions().get(self.selected_index).copied()
    }

    /// Route a key to the composer.
    ///
    /// Typing goes into the input. `q` on an empty input, Enter, and the
    /// scroll keys outside the popup are left for the global bindings.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> EventStatus {
        match key_event.code {
            KeyCode::Char('q') if self.input.is_empty() => EventStatus::NotConsumed,
            KeyCode::Char(c) => {
                self.insert_char(c);
                EventStatus::Consumed
            }
            KeyCode::Backspace if !self.input.is_empty() => {
                self.delete_char();
                EventStatus::Consumed
            }
            KeyCode::Esc if !self.input.is_empty() => {
                self.clear();
                EventStatus::Consumed
            }
            KeyCode::Left => {
                self.move_cursor_left();
                EventStatus::Consumed
            }
            KeyCode::Right => {
                self.move_cursor_right();
                EventStatus::Consumed
            }
            KeyCode::Tab if self.should_show_popup() => {
                self.complete_with_selection();
                EventStatus::Consumed
            }
            KeyCode::Up if self.should_show_popup() => {
                self.move_selection_up();
                EventStatus::Consumed
            }
            KeyCode::Down if self.should_show_popup() => {
                self.move_selection_down();
                EventStatus::Consumed
            }
            _ => EventStatus::NotConsumed,
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_pos);
        self.input.insert(at, c);
        self.cursor_pos += 1;
        self.update_popup_state();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            let at = self.byte_offset(self.cursor_pos - 1);
            self.input.remove(at);
            self.cursor_pos -= 1;
            self.update_popup_state();
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
        self.show_popup = false;
        self.selected_index = 0;
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.input.chars().count() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.suggestions().len() {
            self.selected_index += 1;
        }
    }

    /// Complete with the currently selected suggestion (Tab key).
    pub fn complete_with_selection(&mut self) {
        if let Some((cmd, _)) = self.selected_suggestion() {
            let cmd_name = cmd.split_whitespace().next().unwrap_or(cmd);
            self.input = format!("{cmd_name} ");
            self.cursor_pos = self.input.chars().count();
            self.show_popup = false;
            self.selected_index = 0;
        }
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map_or(self.input.len(), |(i, _)| i)
    }

    fn update_popup_state(&mut self) {
        self.show_popup = self.input.starts_with('/') && !self.input.contains(' ');

        let suggestions = self.suggestions();
        if self.selected_index >= suggestions.len() {
            self.selected_index = suggestions.len().saturating_sub(1);
        }
    }

    /// Render the input field. `notice` replaces the default title.
    pub fn render(&self, area: Rect, buf: &mut Buffer, notice: Option<&str>) {
        let (title, title_style) = match notice {
            Some(notice) => (notice.to_string(), Style::default().fg(Color::Red)),
            None => (
                "Command (/load <path>, Enter to start, q to quit)".to_string(),
                Style::default(),
            ),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, title_style));

        let inner = block.inner(area);
        block.render(area, buf);

        let text = format!("> {}", self.input);
        Paragraph::new(text)
            .style(Style::default().fg(Color::Yellow))
            .render(inner, buf);
    }

    /// Render the autocomplete popup.
    pub fn render_popup(&self, area: Rect, buf: &mut Buffer) {
        if !self.should_show_popup() {
            return;
        }

        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Suggestions")
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(area);
        block.render(area, buf);

        for (i, (cmd, desc)) in self
            .suggestions()
            .iter()
            .enumerate()
            .take(inner.height as usize)
        {
            let style = if i == self.selected_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let line = Line::from(vec![
                Span::styled(format!("{cmd:<16}"), style),
                Span::styled(desc.to_string(), style.fg(Color::Gray)),
            ]);

            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }

    /// Parse the current input into an Op.
    ///
    /// Returns Ok(Some(Op)) if a valid command was parsed,
    /// Ok(None) if input is empty or whitespace,
    /// Err(String) if the command is invalid.
    pub fn parse_command(&self) -> Result<Option<Op>, String> {
        let input = self.input.trim();

        if input.is_empty() {
            return Ok(None);
        }

        if !input.starts_with('/') {
            return Err("Invalid command. Commands must start with '/'".to_string());
        }

        let (cmd, rest) = input.split_once(' ').unwrap_or((input, ""));
        match cmd {
            "/load" => {
                let path = rest.trim();
                if path.is_empty() {
                    return Err("Missing file path".to_string());
                }
                Ok(Some(Op::SelectFile {
                    path: PathBuf::from(path),
                }))
            }
            "/start" => Ok(Some(Op::StartProcessing)),
            _ => Err(format!("Unknown command: {cmd}")),
        }
    }
}
