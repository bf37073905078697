//! Message processing: runs update() and dispatches the resulting actions

use mentor_client::{AnalysisBackend, DiagramEngine};
use tokio::sync::mpsc;

use crate::actions::{handle_action, Services};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
///
/// Follow-up messages are processed immediately; actions are handed to
/// background tasks that answer over `msg_tx`.
pub fn process_message<B, E>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    services: &Services<B, E>,
) where
    B: AnalysisBackend + Sync + 'static,
    E: DiagramEngine + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), services);
        }

        msg = result.message;
    }
}
