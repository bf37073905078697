//! Input field of the active mode

use mentor_core::Mode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

const CURSOR: &str = "█";

pub struct InputPanel<'a> {
    mode: Mode,
    value: &'a str,
    focused: bool,
    locked: bool,
}

impl<'a> InputPanel<'a> {
    pub fn new(mode: Mode, value: &'a str) -> Self {
        Self {
            mode,
            value,
            focused: true,
            locked: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Shown read-only while a request runs
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    fn title(&self) -> &'static str {
        match self.mode {
            Mode::Repo => " GitHub Repository URL ",
            Mode::Snippet => " Code Snippet ",
            Mode::Zip => " Zip Archive Path ",
        }
    }

    fn placeholder(&self) -> &'static str {
        match self.mode {
            Mode::Repo => "https://github.com/user/repo",
            Mode::Snippet => "Paste or type code here (Enter = newline, Ctrl+S = analyze)",
            Mode::Zip => "/path/to/project.zip",
        }
    }
}

impl Widget for InputPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused && !self.locked)
            .title(Span::styled(self.title(), styles::accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let show_cursor = self.focused && !self.locked;

        let mut lines: Vec<Line> = if self.value.is_empty() {
            vec![Line::from(Span::styled(self.placeholder(), styles::text_muted()))]
        } else {
            self.value
                .split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), styles::text_primary())))
                .collect()
        };

        if show_cursor {
            if self.value.is_empty() {
                lines.insert(0, Line::from(Span::styled(CURSOR, styles::accent())));
                lines.truncate(1);
            } else if let Some(last) = lines.last_mut() {
                last.spans.push(Span::styled(CURSOR, styles::accent()));
            }
        }

        // Keep the end of the text (where typing happens) in view
        let height = inner.height as usize;
        let skip = lines.len().saturating_sub(height);
        let visible: Vec<Line> = lines.into_iter().skip(skip).collect();

        Paragraph::new(visible).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_placeholder_when_empty_and_unfocused() {
        let mut term = TestTerminal::with_size(60, 3);
        let panel = InputPanel::new(Mode::Repo, "").focused(false);
        term.render_widget(panel, term.area());

        assert!(term.buffer_contains("GitHub Repository URL"));
        assert!(term.buffer_contains("https://github.com/user/repo"));
    }

    #[test]
    fn test_value_with_cursor() {
        let mut term = TestTerminal::with_size(60, 3);
        let panel = InputPanel::new(Mode::Zip, "/tmp/app.zip");
        term.render_widget(panel, term.area());

        assert!(term.buffer_contains("Zip Archive Path"));
        assert!(term.buffer_contains("/tmp/app.zip█"));
    }

    #[test]
    fn test_locked_panel_hides_cursor() {
        let mut term = TestTerminal::with_size(60, 3);
        let panel = InputPanel::new(Mode::Zip, "/tmp/app.zip").locked(true);
        term.render_widget(panel, term.area());

        assert!(!term.buffer_contains("█"));
    }

    #[test]
    fn test_long_snippet_scrolls_to_end() {
        let code = (1..=20)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut term = TestTerminal::with_size(40, 6);
        let panel = InputPanel::new(Mode::Snippet, &code);
        term.render_widget(panel, term.area());

        assert!(term.buffer_contains("line 20█"));
        assert!(!term.buffer_contains("line 1 "));
    }
}
