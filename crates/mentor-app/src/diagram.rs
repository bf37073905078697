//! Diagram render lifecycle
//!
//! [`DiagramRenderState`] reacts to changes of the diagram description. Each
//! non-empty description produces a [`RenderJob`] with a fresh render id and
//! generation; outcomes are applied only while their generation is the
//! latest one.

use mentor_client::{DiagramOutcome, RenderId};
use mentor_core::prelude::*;
use mentor_core::{Generation, GenerationCounter};

/// One render to perform in the background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub generation: Generation,
    pub id: RenderId,
    pub source: String,
}

#[derive(Debug, Clone, Default)]
pub struct DiagramRenderState {
    loading: bool,
    error: Option<String>,
    markup: Option<String>,
    source: Option<String>,
    render_id: Option<RenderId>,
    generations: GenerationCounter,
}

impl DiagramRenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to a new diagram description
    ///
    /// Returns the job to run, or `None` when there is nothing to render.
    /// Either way any render still in flight becomes stale.
    pub fn on_source_changed(&mut self, source: Option<&str>) -> Option<RenderJob> {
        let generation = self.generations.advance();
        self.error = None;
        self.markup = None;

        let Some(source) = source.map(str::trim).filter(|s| !s.is_empty()) else {
            self.loading = false;
            self.source = None;
            self.render_id = None;
            return None;
        };

        let id = RenderId::fresh(generation);
        self.loading = true;
        self.source = Some(source.to_string());
        self.render_id = Some(id.clone());

        debug!("Diagram render {} queued as {}", generation, id);
        Some(RenderJob {
            generation,
            id,
            source: source.to_string(),
        })
    }

    /// Apply a render outcome; returns false if `generation` is stale
    pub fn apply(&mut self, generation: Generation, outcome: DiagramOutcome) -> bool {
        if !self.generations.is_current(generation) || !self.loading {
            debug!(
                "Discarding stale diagram render {} (latest {})",
                generation,
                self.generations.latest()
            );
            return false;
        }

        match outcome {
            DiagramOutcome::Rendered { markup } => {
                self.markup = Some(markup);
                self.error = None;
            }
            DiagramOutcome::Failed { message } => {
                warn!("Diagram render failed: {}", message);
                self.markup = None;
                self.error = Some(message);
            }
        }
        self.loading = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn render_id(&self) -> Option<&RenderId> {
        self.render_id.as_ref()
    }

    /// The settled outcome of the current render, if it has finished
    pub fn outcome(&self) -> Option<DiagramOutcome> {
        if let Some(markup) = &self.markup {
            return Some(DiagramOutcome::Rendered {
                markup: markup.clone(),
            });
        }
        self.error.as_ref().map(|message| DiagramOutcome::Failed {
            message: message.clone(),
        })
    }
}
