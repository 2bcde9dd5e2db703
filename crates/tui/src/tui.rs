//! Terminal setup and the TUI event stream.
//!
//! This module provides the `Tui` wrapper around ratatui's Terminal,
//! handling raw mode setup, event streaming, and frame scheduling.

use anyhow::Result;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::Event;
use crossterm::event::KeyEvent;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::io::Stdout;
use std::pin::Pin;
use std::time::Duration;
use tokio::select;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{sleep_until, Instant};
use tokio_stream::Stream;
use tokio_stream::StreamExt;

/// Type alias for the terminal backend we're using.
pub type TerminalBackend = CrosstermBackend<Stdout>;

/// Shortest time between two draws.
///
/// Metric counters update every 16 ms each; several of them at once would
/// otherwise request far more frames than a terminal can show.
pub const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// TUI events that can be emitted.
#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    /// Paste event (from bracketed paste).
    Paste(String),
    /// Draw event (triggered by the frame scheduler or a resize).
    Draw,
}

/// Main TUI wrapper.
pub struct Tui {
    terminal: Terminal<TerminalBackend>,
    frame_requester: FrameRequester,
    draw_tx: broadcast::Sender<()>,
}

impl Tui {
    /// Initialize the terminal in raw mode on the alternate screen.
    pub fn init() -> Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnableBracketedPaste, EnterAlternateScreen)?;

        set_panic_hook();

        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

        let (frame_schedule_tx, frame_schedule_rx) = mpsc::unbounded_channel();
        let (draw_tx, _) = broadcast::channel(1);
        tokio::spawn(schedule_frames(frame_schedule_rx, draw_tx.clone()));

        Ok(Self {
            terminal,
            frame_requester: FrameRequester { frame_schedule_tx },
            draw_tx,
        })
    }

    /// Restore the terminal to its original state.
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Get a frame requester for scheduling draws.
    pub fn frame_requester(&self) -> FrameRequester {
        self.frame_requester.clone()
    }

    /// Create an event stream for TUI events.
    pub fn event_stream(&self) -> Pin<Box<dyn Stream<Item = TuiEvent> + Send + 'static>> {
        let mut crossterm_events = crossterm::event::EventStream::new();
        let mut draw_rx = self.draw_tx.subscribe();

        let event_stream = async_stream::stream! {
            loop {
                select! {
                    Some(Ok(event)) = crossterm_events.next() => {
                        match event {
                            Event::Key(key_event) => yield TuiEvent::Key(key_event),
                            Event::Resize(_, _) => yield TuiEvent::Draw,
                            Event::Paste(pasted) => yield TuiEvent::Paste(pasted),
                            _ => {}
                        }
                    }
                    result = draw_rx.recv() => {
                        match result {
                            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                                yield TuiEvent::Draw;
                            }
                            Err(broadcast::error::RecvError::Closed) => break,
                        }
                    }
                }
            }
        };

        Box::pin(event_stream)
    }

    /// Draw the UI with the provided function.
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Handle for scheduling frame redraws.
#[derive(Clone, Debug)]
pub struct FrameRequester {
    frame_schedule_tx: mpsc::UnboundedSender<Instant>,
}

impl FrameRequester {
    /// Schedule a frame as soon as the frame interval allows.
    pub fn schedule_frame(&self) {
        let _ = self.frame_schedule_tx.send(Instant::now());
    }

    /// Schedule a frame after a delay.
    pub fn schedule_frame_in(&self, dur: Duration) {
        let _ = self.frame_schedule_tx.send(Instant::now() + dur);
    }
}

/// Coalesce frame requests into draw notifications.
///
/// Requests are merged into the earliest pending deadline, and no deadline
/// is earlier than [`MIN_FRAME_INTERVAL`] after the previous draw.
async fn schedule_frames(mut rx: mpsc::UnboundedReceiver<Instant>, draw_tx: broadcast::Sender<()>) {
    let mut next_deadline: Option<Instant> = None;
    let mut last_draw: Option<Instant> = None;

    loop {
        let target = next_deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));
        let sleep_fut = sleep_until(target);
        tokio::pin!(sleep_fut);

        select! {
            recv = rx.recv() => {
                let Some(at) = recv else { break };
                let earliest = last_draw.map_or(at, |drawn| at.max(drawn + MIN_FRAME_INTERVAL));
                next_deadline = Some(next_deadline.map_or(earliest, |pending| pending.min(earliest)));
            }
            _ = &mut sleep_fut => {
                if next_deadline.take().is_some() {
                    last_draw = Some(Instant::now());
                    let _ = draw_tx.send(());
                }
            }
        }
    }
}

/// Set a panic hook that restores the terminal before panicking.
fn set_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}
