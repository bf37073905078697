//! Analysis request handlers

use mentor_client::AnalysisInput;
use mentor_core::prelude::*;
use mentor_core::{AnalysisResult, Generation};

use crate::state::{AppState, UiMode};

use super::{UpdateAction, UpdateResult};

/// Validate the active field and start a new analysis
///
/// Invalid input records the mode's message and issues nothing.
pub fn handle_analyze(state: &mut AppState) -> UpdateResult {
    let input = match AnalysisInput::validate(state.mode, state.active_input()) {
        Ok(input) => input,
        Err(e) => {
            info!("Analysis not started: {}", e);
            state.request.reject(e.to_string());
            state.diagram.on_source_changed(None);
            return UpdateResult::none();
        }
    };

    let generation = state.request.begin();
    state.accordion.reset();
    state.section_cursor = 0;
    state.diagram.on_source_changed(None);

    info!(
        "Starting {} analysis {}: {}",
        input.mode(),
        generation,
        input.describe()
    );
    UpdateResult::action(UpdateAction::Analyze { generation, input })
}

/// Store a successful analysis and queue its diagram render
pub fn handle_analysis_completed(
    state: &mut AppState,
    generation: Generation,
    result: AnalysisResult,
) -> UpdateResult {
    if !state.request.complete(generation, result) {
        return UpdateResult::none();
    }

    info!("Analysis {} completed", generation);
    state.section_cursor = 0;
    state.ui_mode = UiMode::Results;

    let source = state
        .request
        .result()
        .and_then(AnalysisResult::diagram_source)
        .map(str::to_string);

    match state.diagram.on_source_changed(source.as_deref()) {
        Some(job) => UpdateResult::action(UpdateAction::RenderDiagram(job)),
        None => UpdateResult::none(),
    }
}

pub fn handle_analysis_failed(
    state: &mut AppState,
    generation: Generation,
    error: String,
) -> UpdateResult {
    if state.request.fail(generation, error) {
        warn!(
            "Analysis {} failed: {}",
            generation,
            state.request.error().unwrap_or_default()
        );
    }
    UpdateResult::none()
}
