//! Status bar: request state, transient notice and key hints

use mentor_app::{AppState, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;
use crate::widgets::results::spinner_frame;

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn status_spans(&self) -> Vec<Span<'static>> {
        let state = self.state;

        if let Some(notice) = &state.notice {
            let style = if notice.is_error {
                styles::status_red()
            } else {
                styles::status_blue()
            };
            return vec![Span::raw(" "), Span::styled(notice.message.clone(), style)];
        }

        let (icon, label, style) = if state.request.is_loading() {
            (spinner_frame(state.tick), "Analyzing", styles::status_yellow())
        } else if state.request.error().is_some() {
            ("●", "Error", styles::status_red())
        } else if state.result().is_some() {
            ("●", "Done", styles::status_green())
        } else {
            ("○", "Ready", styles::text_muted())
        };

        vec![
            Span::raw(" "),
            Span::styled(icon, style),
            Span::raw(" "),
            Span::styled(label, style),
        ]
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match self.state.ui_mode {
            UiMode::Input => vec![
                ("Tab", "Mode"),
                ("Ctrl+S", "Analyze"),
                ("Esc", "Results"),
                ("Ctrl+C", "Quit"),
            ],
            UiMode::Results => vec![
                ("↑↓", "Move"),
                ("Enter", "Toggle"),
                ("o", "Open diagram"),
                ("i", "Input"),
                ("q", "Quit"),
            ],
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let left = Line::from(self.status_spans());
        let left_width = left.width() as u16;
        buf.set_line(area.x, area.y, &left, area.width);

        let mut spans = Vec::new();
        for (key, label) in self.hints() {
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", label), styles::text_muted()));
        }
        let right = Line::from(spans);
        let right_width = right.width() as u16;

        if left_width + right_width + 1 <= area.width {
            buf.set_line(area.x + area.width - right_width, area.y, &right, right_width);
        }
    }
}
