//! Screen layout definitions for the TUI

use mentor_core::Mode;
use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and mode tabs
    pub header: Rect,
    /// Input field of the active mode
    pub input: Rect,
    /// Error, loading indicator or result sections
    pub results: Rect,
    /// One-line status and key hints
    pub status: Rect,
}

/// Rows given to the input panel, borders included
///
/// Snippets get a multi-line editor; the other modes hold one line.
pub fn input_height(mode: Mode, area: Rect) -> u16 {
    match mode {
        Mode::Snippet => (area.height / 3).clamp(5, 14),
        Mode::Repo | Mode::Zip => 3,
    }
}

pub fn create(area: Rect, mode: Mode) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(input_height(mode, area)),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        input: chunks[1],
        results: chunks[2],
        status: chunks[3],
    }
}
