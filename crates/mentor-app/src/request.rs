//! Analysis request lifecycle
//!
//! [`RequestState`] holds the three-state outcome of the current analysis
//! (loading, error, result). Every request is tagged with a [`Generation`];
//! completions of anything but the latest request are ignored.

use mentor_core::prelude::*;
use mentor_core::{AnalysisResult, Generation, GenerationCounter};

/// Loading/error/result of the analysis request
///
/// `error` and `result` are never both set.
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    loading: bool,
    error: Option<String>,
    result: Option<AnalysisResult>,
    generations: GenerationCounter,
}

impl RequestState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request: clears the previous outcome and issues a generation
    pub fn begin(&mut self) -> Generation {
        let generation = self.generations.advance();
        self.error = None;
        self.result = None;
        self.loading = true;
        generation
    }

    /// Record an input validation failure
    ///
    /// No request is issued, and any request still in flight becomes stale.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.generations.advance();
        self.result = None;
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Apply a successful response; returns false if `generation` is stale
    pub fn complete(&mut self, generation: Generation, result: AnalysisResult) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.error = None;
        self.result = Some(result);
        self.loading = false;
        true
    }

    /// Apply a failed response; returns false if `generation` is stale
    pub fn fail(&mut self, generation: Generation, message: impl Into<String>) -> bool {
        if !self.accepts(generation) {
            return false;
        }
        self.result = None;
        self.error = Some(message.into());
        self.loading = false;
        true
    }

    fn accepts(&self, generation: Generation) -> bool {
        if self.generations.is_current(generation) && self.loading {
            return true;
        }
        debug!(
            "Discarding stale analysis completion {} (latest {})",
            generation,
            self.generations.latest()
        );
        false
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Generation of the most recently issued request
    pub fn generation(&self) -> Generation {
        self.generations.latest()
    }
}
