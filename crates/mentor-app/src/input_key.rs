//! Terminal-independent key events
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary,
//! so the state machine never sees terminal library types and the headless
//! runner can drive it without a terminal.

/// A key press as the state machine understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character (already shifted)
    Char(char),
    /// Character with the Ctrl modifier (Ctrl+s, Ctrl+c, ...)
    CharCtrl(char),

    Up,
    Down,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
}
