//! Headless CLI tests
//!
//! Run the `mentor` binary with `--headless` against [`MockAnalysisService`] and
//! check its NDJSON output and exit code.

use std::path::Path;
use std::process::Output;

use tempfile::TempDir;
use tokio::process::Command;

use mentor_client::test_utils::{unused_base_url, MockAnalysisService};
use crate::{RESULT_NO_DIAGRAM, RESULT_WITH_DIAGRAM};

/// Isolated home for logs and config
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(
            &config,
            "[diagram]\ncommand = \"mentor-e2e-missing-mmdc\"\nrender_timeout_secs = 5\n",
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    async fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_mentor"))
            .arg("--headless")
            .arg("--config")
            .arg(self.path().join("config.toml"))
            .args(args)
            .env("HOME", self.path())
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("XDG_CACHE_HOME", self.path().join("cache"))
            .env_remove("MENTOR_API_URL")
            .output()
            .await
            .expect("failed to run mentor")
    }
}

fn events(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line is not JSON"))
        .collect()
}

fn names(events: &[serde_json::Value]) -> Vec<&str> {
    events
        .iter()
        .map(|e| e["event"].as_str().unwrap_or_default())
        .collect()
}

// ─────────────────────────────────────────────────────────
// Successful analyses
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_repo_analysis_succeeds() {
    let service = MockAnalysisService::start(vec![(200, RESULT_NO_DIAGRAM)])
        .await
        .unwrap();
    let sandbox = Sandbox::new();

    let output = sandbox
        .run(&[
            "--api-url",
            &service.base_url,
            "--repo",
            "https://github.com/user/repo",
        ])
        .await;

    assert_eq!(output.status.code(), Some(0));
    let events = events(&output);
    assert_eq!(names(&events), vec!["analysis_started", "analysis_completed"]);
    assert_eq!(events[1]["result"]["project_summary"], "Greets people over HTTP");

    let received = service.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].path, "/analyze-repo");
    assert!(received[0].body_text().contains("https://github.com/user/repo"));
}

#[tokio::test]
async fn test_snippet_from_file_uses_code_endpoint() {
    let service = MockAnalysisService::start(vec![(200, RESULT_NO_DIAGRAM)])
        .await
        .unwrap();
    let sandbox = Sandbox::new();
    let code_file = sandbox.path().join("app.py");
    std::fs::write(&code_file, "def greet(name):\n    return name\n").unwrap();

    let output = sandbox
        .run(&[
            "--api-url",
            &service.base_url,
            "--code-file",
            code_file.to_str().unwrap(),
        ])
        .await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(events(&output)[0]["endpoint"], "/analyze-code");
    assert_eq!(service.received()[0].path, "/analyze-code");
}

#[tokio::test]
async fn test_diagram_failure_still_exits_zero() {
    let service = MockAnalysisService::start(vec![(200, RESULT_WITH_DIAGRAM)])
        .await
        .unwrap();
    let sandbox = Sandbox::new();

    let output = sandbox
        .run(&[
            "--api-url",
            &service.base_url,
            "--repo",
            "https://github.com/user/repo",
        ])
        .await;

    assert_eq!(output.status.code(), Some(0));
    let events = events(&output);
    assert_eq!(
        names(&events),
        vec!["analysis_started", "analysis_completed", "diagram_failed"]
    );
    assert!(events[2]["error"]
        .as_str()
        .unwrap()
        .contains("mentor-e2e-missing-mmdc"));
}

// ─────────────────────────────────────────────────────────
// Failures
// ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_detail_is_reported_and_exit_code_is_one() {
    let service = MockAnalysisService::start(vec![(422, r#"{"detail": "invalid syntax"}"#)])
        .await
        .unwrap();
    let sandbox = Sandbox::new();
    let code_file = sandbox.path().join("broken.py");
    std::fs::write(&code_file, "def (").unwrap();

    let output = sandbox
        .run(&[
            "--api-url",
            &service.base_url,
            "--code-file",
            code_file.to_str().unwrap(),
        ])
        .await;

    assert_eq!(output.status.code(), Some(1));
    let events = events(&output);
    assert_eq!(names(&events), vec!["analysis_started", "analysis_failed"]);
    assert_eq!(events[1]["error"], "invalid syntax");
}

#[tokio::test]
async fn test_empty_input_fails_without_request() {
    let base_url = unused_base_url().await.unwrap();
    let sandbox = Sandbox::new();

    let output = sandbox
        .run(&["--api-url", &base_url, "--mode", "zip"])
        .await;

    assert_eq!(output.status.code(), Some(1));
    let events = events(&output);
    assert_eq!(names(&events), vec!["analysis_started", "analysis_failed"]);
    assert_eq!(events[1]["error"], "Please select a .zip file to analyze.");
}

#[tokio::test]
async fn test_unreachable_service_is_reported() {
    let base_url = unused_base_url().await.unwrap();
    let sandbox = Sandbox::new();

    let output = sandbox
        .run(&[
            "--api-url",
            &base_url,
            "--repo",
            "https://github.com/user/repo",
        ])
        .await;

    assert_eq!(output.status.code(), Some(1));
    let events = events(&output);
    assert_eq!(names(&events), vec!["analysis_started", "analysis_failed"]);
    assert!(events[1]["error"]
        .as_str()
        .unwrap()
        .starts_with("Could not connect to the analysis service"));
}
