//! Diagram rendering capability
//!
//! The [`DiagramEngine`] trait is the call contract of the external renderer:
//! `(render id, description) -> SVG markup`. [`MermaidCliEngine`] fulfils it
//! by running the Mermaid CLI (`mmdc`) in a scratch directory.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use mentor_core::prelude::*;
use mentor_core::Generation;
use tokio::process::Command;

pub const DEFAULT_MMDC_COMMAND: &str = "mmdc";
pub const DEFAULT_THEME: &str = "dark";
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 30;

const FAILURE_CARD_STYLE: &str = "color: #f87171; background-color: #450a0a; \
     border: 1px solid #ef4444; padding: 1rem; border-radius: 8px;";

/// Lines kept after the first error line of the CLI's stderr
const ERROR_DETAIL_LINES: usize = 2;

/// Identifier of one render invocation
///
/// The renderer registers output under this id, so every invocation gets a
/// fresh one; reusing an id could pick up a stale entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderId(String);

impl RenderId {
    pub fn fresh(generation: Generation) -> Self {
        Self(format!(
            "mentor-diagram-{}-{:08x}",
            generation.value(),
            rand::random::<u32>()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed result of one render attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramOutcome {
    Rendered { markup: String },
    Failed { message: String },
}

impl DiagramOutcome {
    pub fn from_result(result: Result<String>) -> Self {
        match result {
            Ok(markup) => Self::Rendered { markup },
            Err(e) => Self::Failed {
                message: e.to_string(),
            },
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    /// Markup for a display surface: the SVG itself, or an inline failure card
    pub fn display_markup(&self) -> String {
        match self {
            Self::Rendered { markup } => markup.clone(),
            Self::Failed { message } => format!(
                "<div style=\"{}\"><strong>Failed to render diagram:</strong><br/>{}</div>",
                FAILURE_CARD_STYLE,
                escape_html(message)
            ),
        }
    }
}

/// Turns a diagram description into SVG markup
#[trait_variant::make(DiagramEngine: Send)]
pub trait LocalDiagramEngine {
    async fn render(&self, id: &RenderId, source: &str) -> Result<String>;
}

/// Renders Mermaid descriptions with the Mermaid CLI
#[derive(Debug, Clone)]
pub struct MermaidCliEngine {
    command: String,
    theme: String,
    timeout: Duration,
}

impl Default for MermaidCliEngine {
    fn default() -> Self {
        Self::new(
            DEFAULT_MMDC_COMMAND,
            DEFAULT_THEME,
            Duration::from_secs(DEFAULT_RENDER_TIMEOUT_SECS),
        )
    }
}

impl MermaidCliEngine {
    pub fn new(command: impl Into<String>, theme: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            theme: theme.into(),
            timeout,
        }
    }

    fn resolve_command(&self) -> Result<PathBuf> {
        which::which(&self.command).map_err(|_| {
            Error::render(format!(
                "Mermaid CLI '{}' not found. Install it with \
                 `npm install -g @mermaid-js/mermaid-cli` or set diagram.command \
                 in the config file.",
                self.command
            ))
        })
    }
}

impl DiagramEngine for MermaidCliEngine {
    async fn render(&self, id: &RenderId, source: &str) -> Result<String> {
        let program = self.resolve_command()?;

        let scratch = tempfile::Builder::new()
            .prefix("mentor-diagram-")
            .tempdir()
            .map_err(|e| Error::render(format!("Failed to create scratch directory: {}", e)))?;
        let input = scratch.path().join(format!("{}.mmd", id));
        let output = scratch.path().join(format!("{}.svg", id));

        tokio::fs::write(&input, source)
            .await
            .map_err(|e| Error::render(format!("Failed to write diagram source: {}", e)))?;

        let mut cmd = Command::new(&program);
        cmd.arg("--input")
            .arg(&input)
            .arg("--output")
            .arg(&output)
            .args(["--svgId", id.as_str()])
            .args(["--theme", self.theme.as_str()])
            .args(["--backgroundColor", "transparent"])
            .arg("--quiet")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Rendering diagram {} with {}", id, program.display());
        let result = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                Error::render(format!(
                    "Diagram rendering timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| Error::render(format!("Failed to run {}: {}", program.display(), e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            debug!("{} stderr: {}", self.command, stderr);
            let message = error_summary(&stderr).unwrap_or_else(|| {
                format!("{} exited with status {}", self.command, result.status)
            });
            return Err(Error::render(message));
        }

        let svg = tokio::fs::read_to_string(&output)
            .await
            .map_err(|e| Error::render(format!("Failed to read rendered diagram: {}", e)))?;

        if svg.trim().is_empty() {
            return Err(Error::render(format!("{} produced no SVG", self.command)));
        }

        Ok(svg)
    }
}

/// Summarise the CLI's stderr
///
/// Starts at the first line mentioning an error (or the first line at all)
/// and appends up to [`ERROR_DETAIL_LINES`] following lines, skipping the
/// caret marker under the source and stopping at stack frames.
fn error_summary(stderr: &str) -> Option<String> {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let start = lines.iter().position(|l| l.contains("Error")).unwrap_or(0);
    let head = lines.get(start)?.trim_start_matches("Error:").trim();

    let details = lines[start + 1..]
        .iter()
        .take_while(|l| !l.starts_with("at "))
        .filter(|l| !is_caret_marker(l))
        .take(ERROR_DETAIL_LINES);

    let summary = std::iter::once(head)
        .chain(details.copied())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (!summary.is_empty()).then_some(summary)
}

/// `-----^` lines pointing at the offending column
fn is_caret_marker(line: &str) -> bool {
    line.contains('^') && line.chars().all(|c| c == '-' || c == '^')
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::GenerationCounter;

    #[test]
    fn test_render_ids_are_unique_per_invocation() {
        let mut counter = GenerationCounter::new();
        let generation = counter.advance();
        let a = RenderId::fresh(generation);
        let b = RenderId::fresh(generation);
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("mentor-diagram-1-"));
    }

    #[test]
    fn test_failed_outcome_markup_embeds_escaped_message() {
        let outcome = DiagramOutcome::Failed {
            message: "Parse error near <end>".into(),
        };
        let markup = outcome.display_markup();
        assert!(markup.contains("Failed to render diagram:"));
        assert!(markup.contains("Parse error near &lt;end&gt;"));
    }

    #[test]
    fn test_outcome_from_result() {
        let ok = DiagramOutcome::from_result(Ok("<svg/>".into()));
        assert!(ok.is_rendered());
        assert_eq!(ok.display_markup(), "<svg/>");

        let failed = DiagramOutcome::from_result(Err(Error::render("bad syntax")));
        assert_eq!(
            failed,
            DiagramOutcome::Failed {
                message: "bad syntax".into()
            }
        );
    }

    #[test]
    fn test_error_summary_keeps_detail_lines() {
        let stderr = "\nGenerating single mermaid chart\n\
                      Error: Parse error on line 1:\n\
                      graph TD; A-->\n\
                      --------------^\n\
                      Expecting 'AMP', 'ALPHA', got 'EOF'\n\
                      Parser.parseError (mermaid.js:1:2)\n";
        assert_eq!(
            error_summary(stderr).as_deref(),
            Some("Parse error on line 1: graph TD; A--> Expecting 'AMP', 'ALPHA', got 'EOF'")
        );
    }

    #[test]
    fn test_error_summary_stops_at_stack_frames() {
        let stderr = "Error: Lexical error on line 2\n    at Object.parse (cli.js:10:3)\n";
        assert_eq!(error_summary(stderr).as_deref(), Some("Lexical error on line 2"));
    }

    #[test]
    fn test_error_summary_without_error_keyword() {
        assert_eq!(error_summary("  \n"), None);
        assert_eq!(error_summary("warning only").as_deref(), Some("warning only"));
    }

    #[tokio::test]
    async fn test_missing_command_is_render_error() {
        let engine = MermaidCliEngine::new(
            "mentor-definitely-missing-mmdc",
            DEFAULT_THEME,
            Duration::from_secs(1),
        );
        let mut counter = GenerationCounter::new();
        let id = RenderId::fresh(counter.advance());

        let err = DiagramEngine::render(&engine, &id, "graph TD; A-->B;")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
        assert!(err.to_string().contains("not found"));
    }

    #[cfg(unix)]
    mod cli {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;

        /// Shell prologue reading the arguments the engine passes
        const READ_ARGS: &str = r#"while [ $# -gt 0 ]; do
  case "$1" in
    --input) in="$2"; shift ;;
    --output) out="$2"; shift ;;
    --svgId) id="$2"; shift ;;
  esac
  shift
done"#;

        /// Write an executable stand-in for `mmdc`
        fn fake_mmdc(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-mmdc");
            std::fs::write(&path, format!("#!/bin/sh\n{}\n{}\n", READ_ARGS, body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        async fn render_with(command: &Path, timeout: Duration) -> (RenderId, Result<String>) {
            let engine = MermaidCliEngine::new(command.to_string_lossy(), DEFAULT_THEME, timeout);
            let id = RenderId::fresh(GenerationCounter::new().advance());
            let result = DiagramEngine::render(&engine, &id, "graph TD; A-->B;").await;
            (id, result)
        }

        #[tokio::test]
        async fn test_successful_render_returns_svg() {
            let dir = tempfile::tempdir().unwrap();
            let command = fake_mmdc(
                dir.path(),
                r#"printf '<svg id="%s">' "$id" > "$out"
cat "$in" >> "$out"
printf '</svg>' >> "$out""#,
            );

            let (id, result) = render_with(&command, Duration::from_secs(10)).await;

            let expected = format!("<svg id=\"{}\">graph TD; A-->B;</svg>", id);
            assert_eq!(result.unwrap(), expected);
        }

        #[tokio::test]
        async fn test_nonzero_exit_reports_stderr_summary() {
            let dir = tempfile::tempdir().unwrap();
            let command = fake_mmdc(
                dir.path(),
                r#"echo "Generating single mermaid chart" >&2
echo "Error: Parse error on line 1:" >&2
echo "graph TD; A-->" >&2
echo "--------------^" >&2
echo "Expecting 'AMP', got 'EOF'" >&2
exit 1"#,
            );

            let (_, result) = render_with(&command, Duration::from_secs(10)).await;
            let err = result.unwrap_err();

            assert!(matches!(err, Error::Render { .. }));
            assert_eq!(
                err.to_string(),
                "Parse error on line 1: graph TD; A--> Expecting 'AMP', got 'EOF'"
            );
        }

        #[tokio::test]
        async fn test_silent_failure_reports_exit_status() {
            let dir = tempfile::tempdir().unwrap();
            let command = fake_mmdc(dir.path(), "exit 3");

            let (_, result) = render_with(&command, Duration::from_secs(10)).await;

            assert!(result.unwrap_err().to_string().contains("exited with status"));
        }

        #[tokio::test]
        async fn test_empty_output_is_render_error() {
            let dir = tempfile::tempdir().unwrap();
            let command = fake_mmdc(dir.path(), r#": > "$out""#);

            let (_, result) = render_with(&command, Duration::from_secs(10)).await;
            let err = result.unwrap_err();

            assert!(matches!(err, Error::Render { .. }));
            assert!(err.to_string().ends_with("produced no SVG"));
        }

        #[tokio::test]
        async fn test_slow_renderer_times_out() {
            let dir = tempfile::tempdir().unwrap();
            let command = fake_mmdc(dir.path(), "sleep 5");

            let (_, result) = render_with(&command, Duration::from_millis(200)).await;

            assert!(result.unwrap_err().to_string().contains("timed out"));
        }
    }
}
