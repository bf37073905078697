//! Diagram render and export handlers

use std::path::PathBuf;

use mentor_client::DiagramOutcome;
use mentor_core::prelude::*;
use mentor_core::Generation;

use crate::export::default_export_dir;
use crate::state::{AppState, Notice};

use super::{UpdateAction, UpdateResult};

pub fn handle_diagram_rendered(
    state: &mut AppState,
    generation: Generation,
    outcome: DiagramOutcome,
) -> UpdateResult {
    if state.diagram.apply(generation, outcome) {
        debug!("Diagram render {} applied", generation);
    }
    UpdateResult::none()
}

/// Export the settled diagram (or its failure card) and open it
pub fn handle_open_diagram(state: &mut AppState) -> UpdateResult {
    if state.diagram.source().is_none() {
        state.notice = Some(Notice::info("No architecture diagram to open."));
        return UpdateResult::none();
    }

    if state.diagram.is_loading() {
        state.notice = Some(Notice::info("Diagram is still rendering..."));
        return UpdateResult::none();
    }

    let (Some(id), Some(outcome)) = (state.diagram.render_id(), state.diagram.outcome()) else {
        return UpdateResult::none();
    };

    UpdateResult::action(UpdateAction::OpenDiagram {
        dir: default_export_dir(),
        id: id.clone(),
        outcome,
        browser: state.settings.ui.browser.clone(),
    })
}

pub fn handle_diagram_exported(state: &mut AppState, path: PathBuf) -> UpdateResult {
    info!("Diagram exported to {}", path.display());
    state.notice = Some(Notice::info(format!("Opened {}", path.display())));
    UpdateResult::none()
}

pub fn handle_diagram_export_failed(state: &mut AppState, error: String) -> UpdateResult {
    warn!("Diagram export failed: {}", error);
    state.notice = Some(Notice::error(format!("Could not open diagram: {}", error)));
    UpdateResult::none()
}
