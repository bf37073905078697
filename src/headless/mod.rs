//! Headless mode - one analysis with NDJSON event output
//!
//! Runs a single analysis without the TUI and reports progress as
//! structured JSON on stdout, so scripts can drive the analysis service
//! without parsing terminal output.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"analysis_started","mode":"repo","endpoint":"/analyze-repo","timestamp":1704700001000}
//! {"event":"analysis_completed","result":{"project_summary":"..."},"timestamp":1704700042000}
//! {"event":"diagram_rendered","bytes":5120,"path":"arch.svg","timestamp":1704700044000}
//! ```

pub mod runner;

use std::io::Write;

use chrono::Utc;
use mentor_core::{AnalysisResult, Mode};
use serde::Serialize;
use tracing::error;

pub use runner::run_headless;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Request issued to the analysis service
    AnalysisStarted {
        mode: Mode,
        endpoint: String,
        timestamp: i64,
    },

    /// Analysis result received
    AnalysisCompleted {
        result: Box<AnalysisResult>,
        timestamp: i64,
    },

    /// Analysis rejected locally or by the service
    AnalysisFailed { error: String, timestamp: i64 },

    /// Architecture diagram rendered to SVG
    DiagramRendered {
        bytes: usize,
        path: Option<String>,
        timestamp: i64,
    },

    /// Architecture diagram could not be rendered
    DiagramFailed { error: String, timestamp: i64 },

    /// Error outside the analysis itself
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Write this event as one NDJSON line to `out`
    pub fn emit_to<W: Write>(&self, out: &mut W) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(out, "{}", json) {
            error!("Failed to write headless event: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = out.flush() {
            error!("Failed to flush headless output: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn analysis_started(mode: Mode) -> Self {
        Self::AnalysisStarted {
            mode,
            endpoint: mode.endpoint().to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn analysis_completed(result: AnalysisResult) -> Self {
        Self::AnalysisCompleted {
            result: Box::new(result),
            timestamp: Self::now(),
        }
    }

    pub fn analysis_failed(error: impl Into<String>) -> Self {
        Self::AnalysisFailed {
            error: error.into(),
            timestamp: Self::now(),
        }
    }

    pub fn diagram_rendered(bytes: usize, path: Option<String>) -> Self {
        Self::DiagramRendered {
            bytes,
            path,
            timestamp: Self::now(),
        }
    }

    pub fn diagram_failed(error: impl Into<String>) -> Self {
        Self::DiagramFailed {
            error: error.into(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }
}
