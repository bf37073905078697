//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use mentor_client::DiagramOutcome;
use mentor_core::{AnalysisResult, Generation, Mode};

use crate::accordion::SectionKey;
use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (spinner)
    Tick,

    /// Request to quit
    Quit,

    // ─────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────
    NextMode,
    PrevMode,
    SelectMode(Mode),

    /// Append a character to the active field
    InputChar(char),
    InputNewline,
    /// Bracketed paste into the active field
    InputPaste(String),
    InputBackspace,
    /// Empty the active field
    ClearInput,

    FocusInput,
    FocusResults,

    // ─────────────────────────────────────────────────────────
    // Analysis
    // ─────────────────────────────────────────────────────────
    /// Validate the active field and start an analysis
    Analyze,

    AnalysisCompleted {
        generation: Generation,
        result: Box<AnalysisResult>,
    },

    AnalysisFailed {
        generation: Generation,
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Result sections
    // ─────────────────────────────────────────────────────────
    SectionUp,
    SectionDown,
    /// Toggle the section under the cursor
    ToggleSelectedSection,
    ToggleSection(SectionKey),

    // ─────────────────────────────────────────────────────────
    // Diagram
    // ─────────────────────────────────────────────────────────
    DiagramRendered {
        generation: Generation,
        outcome: DiagramOutcome,
    },

    /// Export the diagram to an HTML page and open it
    OpenDiagram,
    DiagramExported {
        path: PathBuf,
    },
    DiagramExportFailed {
        error: String,
    },
}
