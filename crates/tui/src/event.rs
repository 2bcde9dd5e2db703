//! Event handling types for the TUI.

/// Status of a key event after being offered to a widget.
///
/// Widgets return this from their `handle_key_event` methods; a
/// `NotConsumed` key is passed on to the global key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The widget handled the key.
    Consumed,
    /// The key should be handled further down the chain.
    NotConsumed,
}
