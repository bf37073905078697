//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for the two focus modes
//! - `request`: Analysis trigger and completion handlers
//! - `diagram`: Diagram render and export handlers

pub(crate) mod diagram;
pub(crate) mod keys;
pub(crate) mod request;
pub(crate) mod update;


use std::path::PathBuf;

use mentor_client::{AnalysisInput, DiagramOutcome, RenderId};
use mentor_core::Generation;

use crate::diagram::RenderJob;
use crate::message::Message;

pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Issue the analysis request for `input`
    Analyze {
        generation: Generation,
        input: AnalysisInput,
    },

    /// Run the diagram engine for a queued render
    RenderDiagram(RenderJob),

    /// Write the diagram page to `dir` and open it in a browser
    OpenDiagram {
        dir: PathBuf,
        id: RenderId,
        outcome: DiagramOutcome,
        browser: String,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
