//! Main TUI runner - terminal lifecycle and event loop

use mentor_app::Engine;
use mentor_client::{AnalysisBackend, DiagramEngine};
use mentor_core::prelude::*;

use crate::{event, render, terminal};

/// Run the TUI until the user quits
///
/// Takes ownership of the engine; the terminal is restored on every exit
/// path, including errors from the loop.
pub async fn run<B, E>(mut engine: Engine<B, E>) -> Result<()>
where
    B: AnalysisBackend + Sync + 'static,
    E: DiagramEngine + Sync + 'static,
{
    terminal::install_panic_hook();
    let mut term = terminal::init()?;

    info!("TUI started");
    let result = run_loop(&mut term, &mut engine);

    terminal::restore();
    info!("TUI stopped");
    result
}

fn run_loop<B, E>(term: &mut ratatui::DefaultTerminal, engine: &mut Engine<B, E>) -> Result<()>
where
    B: AnalysisBackend + Sync + 'static,
    E: DiagramEngine + Sync + 'static,
{
    while !engine.should_quit() {
        // Messages from background tasks and the signal handler
        engine.drain_pending_messages();

        term.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
