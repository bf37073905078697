//! Core domain types for code analysis

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagram descriptions this short (after trimming) are treated as absent
pub const MIN_DIAGRAM_LEN: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Mode
// ─────────────────────────────────────────────────────────────────────────────

/// The three mutually exclusive ways of supplying code for analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Public repository URL
    #[default]
    Repo,
    /// Code pasted into the input field
    Snippet,
    /// Uploaded `.zip` archive
    Zip,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Repo, Mode::Snippet, Mode::Zip];

    /// Human readable label for tabs and headers
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Repo => "Repository",
            Mode::Snippet => "Snippet",
            Mode::Zip => "Zip Upload",
        }
    }

    /// Backend endpoint suffix for this mode
    pub fn endpoint(&self) -> &'static str {
        match self {
            Mode::Repo => "/analyze-repo",
            Mode::Snippet => "/analyze-code",
            Mode::Zip => "/analyze-zip",
        }
    }

    pub fn next(&self) -> Mode {
        match self {
            Mode::Repo => Mode::Snippet,
            Mode::Snippet => Mode::Zip,
            Mode::Zip => Mode::Repo,
        }
    }

    pub fn prev(&self) -> Mode {
        match self {
            Mode::Repo => Mode::Zip,
            Mode::Snippet => Mode::Repo,
            Mode::Zip => Mode::Snippet,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Repo => write!(f, "repo"),
            Mode::Snippet => write!(f, "snippet"),
            Mode::Zip => write!(f, "zip"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repo" => Ok(Mode::Repo),
            "snippet" | "code" => Ok(Mode::Snippet),
            "zip" => Ok(Mode::Zip),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Analysis Result
// ─────────────────────────────────────────────────────────────────────────────

/// A library the analysed project depends on
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct LibraryInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub explanation: String,
}

/// A function the analysis singled out
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct FunctionInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub inputs: String,
    #[serde(default)]
    pub outputs: String,
}

/// Structured response of the analysis backend
///
/// Immutable once received; a new analysis replaces it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub project_summary: String,

    #[serde(default)]
    pub libraries: Vec<LibraryInfo>,

    #[serde(default)]
    pub functions: Vec<FunctionInfo>,

    /// Multi-line, preformatted
    #[serde(default)]
    pub execution_steps: String,

    /// Mermaid description of the architecture, if the backend produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture_diagram: Option<String>,
}

impl AnalysisResult {
    /// The diagram description worth rendering, if any
    ///
    /// Absent, empty and near-empty (≤ [`MIN_DIAGRAM_LEN`] characters after
    /// trimming) descriptions all count as "no diagram".
    pub fn diagram_source(&self) -> Option<&str> {
        self.architecture_diagram
            .as_deref()
            .map(str::trim)
            .filter(|d| d.chars().count() > MIN_DIAGRAM_LEN)
    }

    pub fn has_diagram(&self) -> bool {
        self.diagram_source().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_diagram(diagram: Option<&str>) -> AnalysisResult {
        AnalysisResult {
            architecture_diagram: diagram.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_mode_cycles_through_all_variants() {
        let mut mode = Mode::Repo;
        for _ in 0..3 {
            mode = mode.next();
        }
        assert_eq!(mode, Mode::Repo);
        assert_eq!(Mode::Repo.prev(), Mode::Zip);
    }

    #[test]
    fn test_mode_endpoints() {
        assert_eq!(Mode::Repo.endpoint(), "/analyze-repo");
        assert_eq!(Mode::Snippet.endpoint(), "/analyze-code");
        assert_eq!(Mode::Zip.endpoint(), "/analyze-zip");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("zip".parse::<Mode>(), Ok(Mode::Zip));
        assert_eq!(" Snippet ".parse::<Mode>(), Ok(Mode::Snippet));
        assert!("tarball".parse::<Mode>().is_err());
    }

    #[test]
    fn test_diagram_suppressed_when_absent_or_short() {
        assert!(!with_diagram(None).has_diagram());
        assert!(!with_diagram(Some("")).has_diagram());
        assert!(!with_diagram(Some("   graph   ")).has_diagram());
        assert!(!with_diagram(Some("  graph TD;  ")).has_diagram());
    }

    #[test]
    fn test_diagram_source_is_trimmed() {
        let result = with_diagram(Some("\n  graph TD; A-->B;  \n"));
        assert_eq!(result.diagram_source(), Some("graph TD; A-->B;"));
    }

    #[test]
    fn test_deserialize_full_result() {
        let json = r#"{
            "project_summary": "A CLI tool",
            "libraries": [{"name": "serde", "explanation": "Serialization"}],
            "functions": [
                {"name": "main", "purpose": "Entry", "inputs": "none", "outputs": "exit code"}
            ],
            "execution_steps": "1. parse\n2. run",
            "architecture_diagram": "graph TD; A-->B;"
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.project_summary, "A CLI tool");
        assert_eq!(result.libraries[0].name, "serde");
        assert_eq!(result.functions[0].outputs, "exit code");
        assert!(result.has_diagram());
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"project_summary": "Only a summary"}"#).unwrap();
        assert!(result.libraries.is_empty());
        assert!(result.functions.is_empty());
        assert!(result.architecture_diagram.is_none());
    }
}
