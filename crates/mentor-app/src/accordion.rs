//! Accordion state for the result sections
//!
//! At most one section is expanded at a time. The only mutations are
//! [`AccordionState::toggle`] and [`AccordionState::reset`].

use std::fmt;

use mentor_core::AnalysisResult;

/// One collapsible section of the analysis result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Summary,
    Diagram,
    Libraries,
    Functions,
    Steps,
}

impl SectionKey {
    /// Display order of the sections
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Summary,
        SectionKey::Diagram,
        SectionKey::Libraries,
        SectionKey::Functions,
        SectionKey::Steps,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::Summary => "Project Summary",
            SectionKey::Diagram => "Architecture Diagram",
            SectionKey::Libraries => "Libraries Used",
            SectionKey::Functions => "Key Functions",
            SectionKey::Steps => "How to Run",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            SectionKey::Summary => "summary",
            SectionKey::Diagram => "diagram",
            SectionKey::Libraries => "libraries",
            SectionKey::Functions => "functions",
            SectionKey::Steps => "steps",
        };
        f.write_str(key)
    }
}

/// Which result section is expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccordionState {
    open: Option<SectionKey>,
}

impl Default for AccordionState {
    fn default() -> Self {
        Self {
            open: Some(SectionKey::Summary),
        }
    }
}

impl AccordionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse `key` if it is open, otherwise open it in place of any other
    pub fn toggle(&mut self, key: SectionKey) {
        self.open = if self.open == Some(key) {
            None
        } else {
            Some(key)
        };
    }

    /// Back to the summary; done at the start of every analysis
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn open(&self) -> Option<SectionKey> {
        self.open
    }

    pub fn is_open(&self, key: SectionKey) -> bool {
        self.open == Some(key)
    }
}

/// Sections to show for `result`, in display order
///
/// The diagram section only appears when the result carries a usable
/// diagram description.
pub fn visible_sections(result: &AnalysisResult) -> Vec<SectionKey> {
    SectionKey::ALL
        .into_iter()
        .filter(|key| *key != SectionKey::Diagram || result.has_diagram())
        .collect()
}
