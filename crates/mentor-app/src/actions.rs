//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every action runs in its own task and reports back with a [`Message`]
//! tagged with the generation it was issued under.

use std::sync::Arc;

use mentor_client::{AnalysisBackend, DiagramEngine, DiagramOutcome};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::export;
use crate::message::Message;
use crate::UpdateAction;

/// External capabilities the actions run against
pub struct Services<B, E> {
    pub backend: Arc<B>,
    pub engine: Arc<E>,
}

impl<B, E> Services<B, E> {
    pub fn new(backend: B, engine: E) -> Self {
        Self {
            backend: Arc::new(backend),
            engine: Arc::new(engine),
        }
    }
}

impl<B, E> Clone for Services<B, E> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            engine: self.engine.clone(),
        }
    }
}

/// Execute an action by spawning a background task
pub fn handle_action<B, E>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    services: &Services<B, E>,
) where
    B: AnalysisBackend + Sync + 'static,
    E: DiagramEngine + Sync + 'static,
{
    match action {
        UpdateAction::Analyze { generation, input } => {
            let backend = services.backend.clone();
            tokio::spawn(async move {
                let msg = match backend.analyze(&input).await {
                    Ok(result) => Message::AnalysisCompleted {
                        generation,
                        result: Box::new(result),
                    },
                    Err(e) => Message::AnalysisFailed {
                        generation,
                        error: e.to_string(),
                    },
                };
                if msg_tx.send(msg).await.is_err() {
                    debug!("Analysis {} finished after shutdown", generation);
                }
            });
        }

        UpdateAction::RenderDiagram(job) => {
            let engine = services.engine.clone();
            tokio::spawn(async move {
                let result = engine.render(&job.id, &job.source).await;
                let msg = Message::DiagramRendered {
                    generation: job.generation,
                    outcome: DiagramOutcome::from_result(result),
                };
                if msg_tx.send(msg).await.is_err() {
                    debug!("Diagram render {} finished after shutdown", job.generation);
                }
            });
        }

        UpdateAction::OpenDiagram {
            dir,
            id,
            outcome,
            browser,
        } => {
            tokio::task::spawn_blocking(move || {
                let msg = match export::export_and_open(&dir, &id, &outcome, &browser) {
                    Ok(path) => Message::DiagramExported { path },
                    Err(e) => {
                        warn!("Failed to open diagram {}: {}", id, e);
                        Message::DiagramExportFailed {
                            error: e.to_string(),
                        }
                    }
                };
                let _ = msg_tx.blocking_send(msg);
            });
        }
    }
}
