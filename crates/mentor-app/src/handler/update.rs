//! Main update function - handles state transitions (TEA pattern)

use mentor_core::Mode;

use crate::message::Message;
use crate::state::{AppPhase, AppState, UiMode};

use super::{diagram, keys::handle_key, request, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            state.notice = None;
            match handle_key(state, key) {
                Some(msg) => UpdateResult::message(msg),
                None => UpdateResult::none(),
            }
        }

        Message::Tick => {
            state.tick = state.tick.wrapping_add(1);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Input
        // ─────────────────────────────────────────────────────────
        Message::NextMode => {
            state.mode = state.mode.next();
            UpdateResult::none()
        }

        Message::PrevMode => {
            state.mode = state.mode.prev();
            UpdateResult::none()
        }

        Message::SelectMode(mode) => {
            state.mode = mode;
            UpdateResult::none()
        }

        Message::InputChar(c) => {
            state.inputs.get_mut(state.mode).push(c);
            UpdateResult::none()
        }

        Message::InputNewline => {
            state.inputs.get_mut(state.mode).push('\n');
            UpdateResult::none()
        }

        Message::InputPaste(text) => {
            // Pastes bypass the key handler, so honor the loading lock here
            if !state.request.is_loading() {
                paste_into(state, &text);
            }
            UpdateResult::none()
        }

        Message::InputBackspace => {
            state.inputs.get_mut(state.mode).pop();
            UpdateResult::none()
        }

        Message::ClearInput => {
            state.inputs.get_mut(state.mode).clear();
            UpdateResult::none()
        }

        Message::FocusInput => {
            state.ui_mode = UiMode::Input;
            UpdateResult::none()
        }

        Message::FocusResults => {
            state.ui_mode = UiMode::Results;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Analysis
        // ─────────────────────────────────────────────────────────
        Message::Analyze => request::handle_analyze(state),

        Message::AnalysisCompleted { generation, result } => {
            request::handle_analysis_completed(state, generation, *result)
        }

        Message::AnalysisFailed { generation, error } => {
            request::handle_analysis_failed(state, generation, error)
        }

        // ─────────────────────────────────────────────────────────
        // Result sections
        // ─────────────────────────────────────────────────────────
        Message::SectionUp => {
            state.section_cursor = state.section_cursor.saturating_sub(1);
            UpdateResult::none()
        }

        Message::SectionDown => {
            let last = state.visible_sections().len().saturating_sub(1);
            state.section_cursor = (state.section_cursor + 1).min(last);
            UpdateResult::none()
        }

        Message::ToggleSelectedSection => {
            if let Some(key) = state.selected_section() {
                state.accordion.toggle(key);
            }
            UpdateResult::none()
        }

        Message::ToggleSection(key) => {
            state.accordion.toggle(key);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Diagram
        // ─────────────────────────────────────────────────────────
        Message::DiagramRendered {
            generation,
            outcome,
        } => diagram::handle_diagram_rendered(state, generation, outcome),

        Message::OpenDiagram => diagram::handle_open_diagram(state),

        Message::DiagramExported { path } => diagram::handle_diagram_exported(state, path),

        Message::DiagramExportFailed { error } => {
            diagram::handle_diagram_export_failed(state, error)
        }
    }
}

/// Insert pasted text; single-line fields keep only the first line
fn paste_into(state: &mut AppState, text: &str) {
    let text = text.replace("\r\n", "\n");
    let field = state.inputs.get_mut(state.mode);
    if state.mode == Mode::Snippet {
        field.push_str(&text);
    } else {
        field.push_str(text.lines().next().unwrap_or_default().trim());
    }
}
