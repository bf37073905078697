//! Code Mentor
//!
//! Terminal client for a remote code-analysis service: submit a GitHub
//! repository, a code snippet or a zip archive and browse the structured
//! explanation that comes back.

pub mod cli;
pub mod headless;

use mentor_app::config::{default_config_path, init_config_file, validate_settings};
use mentor_app::Engine;
use mentor_client::{HttpBackend, MermaidCliEngine};
use mentor_core::prelude::*;

pub use cli::Args;
pub use headless::run_headless;

/// Application entry point; returns the process exit code
pub async fn run(args: Args) -> Result<i32> {
    if args.init_config {
        let path = args
            .config
            .clone()
            .or_else(default_config_path)
            .ok_or_else(|| Error::config("Could not determine config directory"))?;
        init_config_file(&path)?;
        eprintln!("Config file: {}", path.display());
        return Ok(0);
    }

    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since TUI owns the terminal)
    let log_dir = mentor_core::logging::init()?;

    info!("═══════════════════════════════════════════════════════");
    info!("Code Mentor starting");
    info!("Log directory: {}", log_dir.display());
    info!("═══════════════════════════════════════════════════════");

    let settings = args.settings();
    validate_settings(&settings)?;
    info!("Analysis service: {}", settings.backend.base_url);

    let prefill = args.prefill()?;

    let backend = HttpBackend::new(&settings.backend.base_url, settings.backend.timeout())?;
    let diagrams = MermaidCliEngine::new(
        settings.diagram.command.clone(),
        settings.diagram.theme.clone(),
        settings.diagram.render_timeout(),
    );

    let mut engine = Engine::new(settings, backend, diagrams);
    if let Some((mode, value)) = prefill {
        engine.state.prefill(mode, value);
    }

    let result = if args.headless {
        run_headless(engine, args.diagram_out.as_deref())
            .await
            .map(|succeeded| if succeeded { 0 } else { 1 })
    } else {
        mentor_tui::run(engine).await.map(|()| 0)
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("Code Mentor exiting");
    result
}
