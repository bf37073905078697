//! Analysis results: error, loading indicator or the section accordion

use mentor_app::{AppState, SectionKey, UiMode};
use mentor_core::AnalysisResult;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER[(tick as usize) % SPINNER.len()]
}

pub struct ResultsView<'a> {
    state: &'a AppState,
}

impl<'a> ResultsView<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Lines of the accordion plus the line index of the cursor header
    fn accordion_lines(&self, result: &AnalysisResult) -> (Vec<Line<'static>>, usize) {
        let focused = self.state.ui_mode == UiMode::Results;
        let mut lines = Vec::new();
        let mut cursor_line = 0;

        for (i, key) in self.state.visible_sections().into_iter().enumerate() {
            let open = self.state.accordion.is_open(key);
            let selected = i == self.state.section_cursor;
            if selected {
                cursor_line = lines.len();
            }

            let marker = if open { "▾ " } else { "▸ " };
            let mut header_style = styles::accent_bold();
            if selected && focused {
                header_style = header_style.patch(styles::section_cursor());
            }
            lines.push(Line::from(vec![
                Span::styled(marker, styles::accent()),
                Span::styled(key.title(), header_style),
            ]));

            if open {
                lines.extend(self.section_body(key, result));
                lines.push(Line::default());
            }
        }

        (lines, cursor_line)
    }

    fn section_body(&self, key: SectionKey, result: &AnalysisResult) -> Vec<Line<'static>> {
        match key {
            SectionKey::Summary => text_block(&result.project_summary),
            SectionKey::Diagram => self.diagram_body(),
            SectionKey::Libraries => {
                if result.libraries.is_empty() {
                    return vec![muted("  No libraries reported.")];
                }
                result
                    .libraries
                    .iter()
                    .map(|lib| {
                        Line::from(vec![
                            Span::styled("  • ", styles::accent()),
                            Span::styled(
                                lib.name.clone(),
                                styles::text_primary().add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(": ", styles::text_muted()),
                            Span::styled(lib.explanation.clone(), styles::text_secondary()),
                        ])
                    })
                    .collect()
            }
            SectionKey::Functions => {
                if result.functions.is_empty() {
                    return vec![muted("  No functions reported.")];
                }
                let mut lines = Vec::new();
                for func in &result.functions {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", func.name),
                        styles::text_primary().add_modifier(Modifier::BOLD),
                    )));
                    for (label, value) in [
                        ("Purpose", &func.purpose),
                        ("Inputs", &func.inputs),
                        ("Outputs", &func.outputs),
                    ] {
                        lines.push(Line::from(vec![
                            Span::styled(format!("    {}: ", label), styles::text_muted()),
                            Span::styled(value.clone(), styles::text_secondary()),
                        ]));
                    }
                }
                lines
            }
            SectionKey::Steps => result
                .execution_steps
                .lines()
                .map(|l| Line::from(Span::styled(format!("  {}", l), styles::code())))
                .collect(),
        }
    }

    fn diagram_body(&self) -> Vec<Line<'static>> {
        let diagram = &self.state.diagram;
        let mut lines = Vec::new();

        if diagram.is_loading() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} ", spinner_frame(self.state.tick)),
                    styles::status_yellow(),
                ),
                Span::styled("Rendering diagram...", styles::text_secondary()),
            ]));
        } else if let Some(error) = diagram.error() {
            lines.push(Line::from(vec![
                Span::styled("  Failed to render diagram: ", styles::status_red()),
                Span::styled(error.to_string(), styles::status_red()),
            ]));
        } else if let Some(markup) = diagram.markup() {
            lines.push(Line::from(vec![
                Span::styled("  ✓ ", styles::status_green()),
                Span::styled(
                    format!("Diagram rendered ({} bytes of SVG). Press ", markup.len()),
                    styles::text_secondary(),
                ),
                Span::styled("o", styles::keybinding()),
                Span::styled(" to open it in a browser.", styles::text_secondary()),
            ]));
        }

        if let Some(source) = diagram.source() {
            lines.push(Line::default());
            lines.extend(
                source
                    .lines()
                    .map(|l| Line::from(Span::styled(format!("    {}", l), styles::code()))),
            );
        }
        lines
    }
}

fn text_block(text: &str) -> Vec<Line<'static>> {
    if text.trim().is_empty() {
        return vec![muted("  (empty)")];
    }
    text.lines()
        .map(|l| Line::from(Span::styled(format!("  {}", l), styles::text_primary())))
        .collect()
}

fn muted(text: &str) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), styles::text_muted()))
}

impl Widget for ResultsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.state.ui_mode == UiMode::Results;
        let block =
            styles::glass_block(focused).title(Span::styled(" Analysis ", styles::accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let request = &self.state.request;

        if request.is_loading() {
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_frame(self.state.tick)),
                    styles::status_yellow(),
                ),
                Span::styled(
                    "Analyzing... this can take a while for large repositories.",
                    styles::text_secondary(),
                ),
            ]);
            Paragraph::new(line).render(inner, buf);
            return;
        }

        if let Some(error) = request.error() {
            let lines = vec![
                Line::from(Span::styled(
                    "Error",
                    styles::status_red().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(error.to_string(), styles::status_red())),
            ];
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .render(inner, buf);
            return;
        }

        let Some(result) = request.result() else {
            let hint = Line::from(vec![
                Span::styled("Enter your input above and press ", styles::text_muted()),
                Span::styled("Ctrl+S", styles::keybinding()),
                Span::styled(" to analyze.", styles::text_muted()),
            ]);
            Paragraph::new(hint).render(inner, buf);
            return;
        };

        let (lines, cursor_line) = self.accordion_lines(result);

        // Keep the cursor's section header on screen
        let height = inner.height as usize;
        let scroll = cursor_line.saturating_sub(height / 3);

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll.min(u16::MAX as usize) as u16, 0))
            .render(inner, buf);
    }
}
