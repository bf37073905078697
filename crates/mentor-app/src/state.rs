//! Application state (Model in TEA pattern)

use mentor_core::{AnalysisResult, Mode};

use crate::accordion::{visible_sections, AccordionState, SectionKey};
use crate::config::Settings;
use crate::diagram::DiagramRenderState;
use crate::request::RequestState;

/// Which pane receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Editing the active mode's input field
    #[default]
    Input,
    /// Navigating the result sections
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Raw text of each mode's input; switching modes keeps every field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFields {
    pub repo_url: String,
    pub code: String,
    pub zip_path: String,
}

impl InputFields {
    pub fn get(&self, mode: Mode) -> &str {
        match mode {
            Mode::Repo => &self.repo_url,
            Mode::Snippet => &self.code,
            Mode::Zip => &self.zip_path,
        }
    }

    pub fn get_mut(&mut self, mode: Mode) -> &mut String {
        match mode {
            Mode::Repo => &mut self.repo_url,
            Mode::Snippet => &mut self.code,
            Mode::Zip => &mut self.zip_path,
        }
    }
}

/// Transient status line message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,

    /// Active input method
    pub mode: Mode,
    pub inputs: InputFields,

    pub request: RequestState,
    pub accordion: AccordionState,
    pub diagram: DiagramRenderState,

    pub ui_mode: UiMode,
    /// Index into the visible result sections
    pub section_cursor: usize,
    pub notice: Option<Notice>,

    pub phase: AppPhase,
    /// Incremented on every tick; drives the spinner
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            mode: settings.ui.default_mode,
            settings,
            inputs: InputFields::default(),
            request: RequestState::new(),
            accordion: AccordionState::new(),
            diagram: DiagramRenderState::new(),
            ui_mode: UiMode::Input,
            section_cursor: 0,
            notice: None,
            phase: AppPhase::Running,
            tick: 0,
        }
    }

    /// Select `mode` and put `value` in its field
    pub fn prefill(&mut self, mode: Mode, value: impl Into<String>) {
        self.mode = mode;
        *self.inputs.get_mut(mode) = value.into();
    }

    pub fn active_input(&self) -> &str {
        self.inputs.get(self.mode)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.request.result()
    }

    /// Sections shown for the current result (empty without one)
    pub fn visible_sections(&self) -> Vec<SectionKey> {
        self.result().map(visible_sections).unwrap_or_default()
    }

    /// Section under the results cursor
    pub fn selected_section(&self) -> Option<SectionKey> {
        self.visible_sections().get(self.section_cursor).copied()
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}
