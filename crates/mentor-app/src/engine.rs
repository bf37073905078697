//! Engine - shared orchestration for the TUI and headless runners
//!
//! Owns the application state, the message channel and the external
//! services. Frontends feed it messages and read `state` back.

use mentor_client::{AnalysisBackend, DiagramEngine};
use tokio::sync::mpsc;

use crate::actions::Services;
use crate::config::Settings;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Capacity of the unified message channel
pub const MESSAGE_CHANNEL_CAPACITY: usize = 256;

pub struct Engine<B, E> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, terminal events).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half; the frontend drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    services: Services<B, E>,
}

impl<B, E> Engine<B, E>
where
    B: AnalysisBackend + Sync + 'static,
    E: DiagramEngine + Sync + 'static,
{
    /// Create an engine and spawn the signal handler
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(settings: Settings, backend: B, engine: E) -> Self {
        let this = Self::without_signals(settings, backend, engine);
        signals::spawn_signal_handler(this.msg_tx.clone());
        this
    }

    /// Create an engine without hooking process signals
    pub fn without_signals(settings: Settings, backend: B, engine: E) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        Self {
            state: AppState::with_settings(settings),
            msg_tx,
            msg_rx,
            services: Services::new(backend, engine),
        }
    }

    /// Process a single message through the TEA update cycle
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.services);
    }

    /// Drain and process all pending messages; returns how many were handled
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message from a background task or input source
    pub async fn next_message(&mut self) -> Option<Message> {
        self.msg_rx.recv().await
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// True while an analysis or diagram render is outstanding
    pub fn is_busy(&self) -> bool {
        self.state.request.is_loading() || self.state.diagram.is_loading()
    }
}
