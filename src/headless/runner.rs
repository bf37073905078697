//! Headless mode runner - one analysis without the TUI
//!
//! Drives the engine through a single analysis of the prefilled input and
//! reports every observable step as a [`HeadlessEvent`].

use std::io::{self, Write};
use std::path::Path;

use mentor_app::{Engine, Message};
use mentor_client::{AnalysisBackend, DiagramEngine, DiagramOutcome};
use mentor_core::prelude::*;
use mentor_core::Generation;

use super::HeadlessEvent;

/// Run the analysis of the current input; returns whether it succeeded
///
/// A diagram render failure does not fail the run; only the analysis does.
pub async fn run_headless<B, E>(
    mut engine: Engine<B, E>,
    diagram_out: Option<&Path>,
) -> Result<bool>
where
    B: AnalysisBackend + Sync + 'static,
    E: DiagramEngine + Sync + 'static,
{
    info!("═══════════════════════════════════════════════════════");
    info!("Code Mentor starting in HEADLESS mode");
    info!("Mode: {}", engine.state.mode);
    info!("═══════════════════════════════════════════════════════");

    let mut stdout = io::stdout();
    let succeeded = run_analysis(&mut engine, diagram_out, &mut stdout).await;

    info!("Code Mentor headless mode exiting (success: {})", succeeded);
    Ok(succeeded)
}

/// What to look for in the state once a message has been processed
enum Watch {
    Analysis(Generation),
    Diagram(DiagramOutcome),
}

impl Watch {
    fn for_message(msg: &Message) -> Option<Self> {
        match msg {
            Message::AnalysisCompleted { generation, .. }
            | Message::AnalysisFailed { generation, .. } => Some(Self::Analysis(*generation)),
            Message::DiagramRendered { outcome, .. } => Some(Self::Diagram(outcome.clone())),
            _ => None,
        }
    }
}

async fn run_analysis<B, E, W>(
    engine: &mut Engine<B, E>,
    diagram_out: Option<&Path>,
    out: &mut W,
) -> bool
where
    B: AnalysisBackend + Sync + 'static,
    E: DiagramEngine + Sync + 'static,
    W: Write,
{
    HeadlessEvent::analysis_started(engine.state.mode).emit_to(out);
    engine.process_message(Message::Analyze);

    // Rejected before any request was issued
    if let Some(error) = engine.state.request.error() {
        HeadlessEvent::analysis_failed(error).emit_to(out);
        return false;
    }

    while engine.is_busy() {
        if engine.should_quit() {
            warn!("Quit requested while work was outstanding");
            HeadlessEvent::error("Interrupted before the analysis finished", true).emit_to(out);
            break;
        }

        let Some(msg) = engine.next_message().await else {
            info!("Message channel closed");
            break;
        };

        let watch = Watch::for_message(&msg);
        engine.process_message(msg);

        if let Some(watch) = watch {
            emit_post_message_events(engine, watch, diagram_out, out);
        }
    }

    engine.state.request.result().is_some()
}

fn emit_post_message_events<B, E, W>(
    engine: &Engine<B, E>,
    watch: Watch,
    diagram_out: Option<&Path>,
    out: &mut W,
) where
    W: Write,
{
    let state = &engine.state;
    match watch {
        Watch::Analysis(generation) => {
            if generation != state.request.generation() {
                return;
            }
            if let Some(result) = state.request.result() {
                HeadlessEvent::analysis_completed(result.clone()).emit_to(out);
            } else if let Some(error) = state.request.error() {
                HeadlessEvent::analysis_failed(error).emit_to(out);
            }
        }
        Watch::Diagram(outcome) => {
            if state.diagram.is_loading() || state.diagram.outcome().as_ref() != Some(&outcome) {
                return;
            }
            match outcome {
                DiagramOutcome::Rendered { markup } => {
                    let path = diagram_out.and_then(|path| match std::fs::write(path, &markup) {
                        Ok(()) => Some(path.display().to_string()),
                        Err(e) => {
                            error!("Failed to write diagram to {}: {}", path.display(), e);
                            HeadlessEvent::error(
                                format!("Failed to write diagram to {}: {}", path.display(), e),
                                false,
                            )
                            .emit_to(out);
                            None
                        }
                    });
                    HeadlessEvent::diagram_rendered(markup.len(), path).emit_to(out);
                }
                DiagramOutcome::Failed { message } => {
                    HeadlessEvent::diagram_failed(message).emit_to(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_app::Settings;
    use mentor_client::request::CODE_REQUIRED;
    use mentor_client::test_utils::{sample_result, ScriptedBackend, ScriptedEngine, ScriptedReply};
    use mentor_core::Mode;

    fn events(out: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8_lossy(out)
            .lines()
            .map(|line| serde_json::from_str(line).expect("invalid NDJSON line"))
            .collect()
    }

    fn event_names(events: &[serde_json::Value]) -> Vec<String> {
        events
            .iter()
            .map(|e| e["event"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_successful_analysis_writes_diagram() {
        let backend = ScriptedBackend::new();
        backend.push(ScriptedReply::Success(sample_result(Some("graph TD; A-->B;"))));
        let diagrams = ScriptedEngine::new();
        let mut engine = Engine::without_signals(Settings::default(), backend, diagrams);
        engine.state.prefill(Mode::Repo, "https://github.com/user/repo");

        let dir = tempfile::tempdir().unwrap();
        let svg_path = dir.path().join("arch.svg");
        let mut out = Vec::new();

        let succeeded = run_analysis(&mut engine, Some(&svg_path), &mut out).await;

        assert!(succeeded);
        let events = events(&out);
        assert_eq!(
            event_names(&events),
            vec!["analysis_started", "analysis_completed", "diagram_rendered"]
        );
        assert_eq!(events[0]["endpoint"], "/analyze-repo");
        assert_eq!(events[2]["path"], svg_path.display().to_string());

        let svg = std::fs::read_to_string(&svg_path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(events[2]["bytes"], svg.len());
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_request() {
        let backend = ScriptedBackend::new();
        let mut engine =
            Engine::without_signals(Settings::default(), backend.clone(), ScriptedEngine::new());
        engine.state.prefill(Mode::Snippet, "   ");

        let mut out = Vec::new();
        let succeeded = run_analysis(&mut engine, None, &mut out).await;

        assert!(!succeeded);
        let events = events(&out);
        assert_eq!(event_names(&events), vec!["analysis_started", "analysis_failed"]);
        assert_eq!(events[1]["error"], CODE_REQUIRED);
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_server_error_fails_run() {
        let backend = ScriptedBackend::new();
        backend.push(ScriptedReply::Server {
            status: 422,
            detail: "invalid syntax".into(),
        });
        let mut engine =
            Engine::without_signals(Settings::default(), backend, ScriptedEngine::new());
        engine.state.prefill(Mode::Snippet, "def (");

        let mut out = Vec::new();
        let succeeded = run_analysis(&mut engine, None, &mut out).await;

        assert!(!succeeded);
        let events = events(&out);
        assert_eq!(event_names(&events), vec!["analysis_started", "analysis_failed"]);
        assert_eq!(events[1]["error"], "invalid syntax");
    }

    #[tokio::test]
    async fn test_diagram_failure_does_not_fail_run() {
        let backend = ScriptedBackend::new();
        backend.push(ScriptedReply::Success(sample_result(Some("this is not a diagram"))));
        let mut engine =
            Engine::without_signals(Settings::default(), backend, ScriptedEngine::new());
        engine.state.prefill(Mode::Repo, "https://github.com/user/repo");

        let mut out = Vec::new();
        let succeeded = run_analysis(&mut engine, None, &mut out).await;

        assert!(succeeded);
        let events = events(&out);
        assert_eq!(
            event_names(&events),
            vec!["analysis_started", "analysis_completed", "diagram_failed"]
        );
        assert!(events[2]["error"]
            .as_str()
            .unwrap()
            .contains("this is not a diagram"));
    }
}
