//! Header bar with title, backend address and mode tabs

use mentor_core::Mode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

pub struct MainHeader<'a> {
    mode: Mode,
    base_url: &'a str,
}

impl<'a> MainHeader<'a> {
    pub fn new(mode: Mode, base_url: &'a str) -> Self {
        Self { mode, base_url }
    }

    fn tabs_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, mode) in Mode::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", styles::text_muted()));
            }
            let style = if *mode == self.mode {
                styles::accent_bold().add_modifier(Modifier::UNDERLINED)
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(mode.label(), style));
        }
        spans.push(Span::raw(" "));
        Line::from(spans)
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title = Line::from(vec![
            Span::raw(" "),
            Span::styled("◆", styles::accent()),
            Span::raw(" "),
            Span::styled("Code Mentor", styles::accent_bold()),
        ]);
        let backend = Line::from(vec![
            Span::styled(" / ", styles::text_muted()),
            Span::styled(self.base_url.to_string(), styles::text_secondary()),
        ]);
        let tabs = self.tabs_line();

        let title_width = title.width() as u16;
        let backend_width = backend.width() as u16;
        let tabs_width = tabs.width() as u16;

        buf.set_line(inner.x, inner.y, &title, inner.width);

        // Tabs take priority over the backend address when space is short
        let tabs_fit = title_width + tabs_width + 1 <= inner.width;
        if tabs_fit {
            let tabs_x = inner.x + inner.width - tabs_width;
            buf.set_line(tabs_x, inner.y, &tabs, tabs_width);
        }

        let reserved = if tabs_fit { tabs_width + 2 } else { 0 };
        if title_width + backend_width + reserved <= inner.width {
            buf.set_line(inner.x + title_width, inner.y, &backend, backend_width);
        }
    }
}
