//! Key event handlers for the input and results panes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};
use mentor_core::Mode;

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Input => handle_key_input(state, key),
        UiMode::Results => handle_key_results(key),
    }
}

/// Handle key events while editing the input field
fn handle_key_input(state: &AppState, key: InputKey) -> Option<Message> {
    // Editing and analyzing wait for the running request
    let busy = state.request.is_loading();

    match key {
        InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Tab => Some(Message::NextMode),
        InputKey::BackTab => Some(Message::PrevMode),
        InputKey::Esc => Some(Message::FocusResults),

        _ if busy => None,

        InputKey::CharCtrl('s') => Some(Message::Analyze),
        InputKey::CharCtrl('u') => Some(Message::ClearInput),

        // Snippets are multi-line; Enter submits everywhere else
        InputKey::Enter if state.mode == Mode::Snippet => Some(Message::InputNewline),
        InputKey::Enter => Some(Message::Analyze),

        InputKey::Backspace => Some(Message::InputBackspace),
        InputKey::Char(c) => Some(Message::InputChar(c)),

        _ => None,
    }
}

/// Handle key events while navigating the result sections
fn handle_key_results(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::Up | InputKey::Char('k') => Some(Message::SectionUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::SectionDown),
        InputKey::Enter | InputKey::Char(' ') => Some(Message::ToggleSelectedSection),

        InputKey::Char('o') => Some(Message::OpenDiagram),

        InputKey::Esc | InputKey::Char('i') => Some(Message::FocusInput),

        _ => None,
    }
}
