//! Test doubles for the analysis backend and the diagram engine
//!
//! Both doubles are cheap to clone and share their script and call log, so a
//! test can hand one clone to the code under test and inspect the other.
//! [`MockAnalysisService`] stands in for the real service over HTTP.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use mentor_core::prelude::*;
use mentor_core::AnalysisResult;

use crate::backend::AnalysisBackend;
use crate::diagram::{DiagramEngine, RenderId};
use crate::request::AnalysisInput;

/// One canned backend reply
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Success(AnalysisResult),
    /// Non-success status with the given `detail` text
    Server { status: u16, detail: String },
    /// No response at all
    Transport(String),
}

#[derive(Debug, Default)]
struct BackendScript {
    replies: VecDeque<(ScriptedReply, Option<Duration>)>,
    calls: Vec<AnalysisInput>,
}

/// Backend that answers from a queue of scripted replies
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    script: Arc<Mutex<BackendScript>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: ScriptedReply) -> &Self {
        self.lock().replies.push_back((reply, None));
        self
    }

    /// Queue a reply that resolves only after `delay`
    pub fn push_delayed(&self, reply: ScriptedReply, delay: Duration) -> &Self {
        self.lock().replies.push_back((reply, Some(delay)));
        self
    }

    /// Number of requests that reached the "network"
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn calls(&self) -> Vec<AnalysisInput> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BackendScript> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AnalysisBackend for ScriptedBackend {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        let next = {
            let mut script = self.lock();
            script.calls.push(input.clone());
            script.replies.pop_front()
        };

        let Some((reply, delay)) = next else {
            return Err(Error::transport("no scripted reply"));
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match reply {
            ScriptedReply::Success(result) => Ok(result),
            ScriptedReply::Server { status, detail } => Err(Error::server(status, detail)),
            ScriptedReply::Transport(message) => Err(Error::transport(message)),
        }
    }
}

#[derive(Debug, Default)]
struct EngineScript {
    delays: Vec<(String, Duration)>,
    calls: Vec<(RenderId, String)>,
}

/// Engine that accepts descriptions starting with a known diagram keyword
///
/// Accepted descriptions render to a small `<svg>` tagged with the render id;
/// anything else fails with a Mermaid-style parse error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    script: Arc<Mutex<EngineScript>>,
}

const DIAGRAM_KEYWORDS: &[&str] = &[
    "graph",
    "flowchart",
    "sequenceDiagram",
    "classDiagram",
    "stateDiagram",
    "erDiagram",
];

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay renders of exactly `source`
    pub fn delay_for(&self, source: &str, delay: Duration) -> &Self {
        self.lock().delays.push((source.to_string(), delay));
        self
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn calls(&self) -> Vec<(RenderId, String)> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, EngineScript> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiagramEngine for ScriptedEngine {
    async fn render(&self, id: &RenderId, source: &str) -> Result<String> {
        let delay = {
            let mut script = self.lock();
            script.calls.push((id.clone(), source.to_string()));
            script
                .delays
                .iter()
                .find(|(s, _)| s == source)
                .map(|(_, d)| *d)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let keyword = source.split_whitespace().next().unwrap_or_default();
        let keyword = keyword.trim_end_matches(';');
        if DIAGRAM_KEYWORDS.contains(&keyword) {
            Ok(format!(
                "<svg id=\"{}\" xmlns=\"http://www.w3.org/2000/svg\"><g class=\"nodes\"></g></svg>",
                id
            ))
        } else {
            Err(Error::render(format!(
                "Parse error on line 1: No diagram type detected for text: {}",
                source
            )))
        }
    }
}

// ─────────────────────────────────────────────────────────
// HTTP mock service
// ─────────────────────────────────────────────────────────

/// A request as seen by [`MockAnalysisService`]
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ReceivedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Default)]
struct ServiceScript {
    responses: VecDeque<(u16, String)>,
    received: Vec<ReceivedRequest>,
}

type SharedServiceScript = Arc<Mutex<ServiceScript>>;

/// Local axum server that answers any route with canned JSON responses
///
/// Responses are served in order, one per request; once they run out every
/// request gets a 503. Each request is recorded before it is answered.
#[derive(Debug, Clone)]
pub struct MockAnalysisService {
    pub base_url: String,
    script: SharedServiceScript,
}

impl MockAnalysisService {
    /// Bind `127.0.0.1:0` and serve `responses` (status, body) in order
    pub async fn start(responses: Vec<(u16, &str)>) -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let script = Arc::new(Mutex::new(ServiceScript {
            responses: responses
                .into_iter()
                .map(|(status, body)| (status, body.to_string()))
                .collect(),
            received: Vec::new(),
        }));

        let app = Router::new()
            .fallback(record_and_reply)
            .with_state(script.clone());

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warn!("Mock analysis service stopped: {}", e);
            }
        });

        Ok(Self { base_url, script })
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        lock_script(&self.script).received.clone()
    }
}

fn lock_script(script: &SharedServiceScript) -> std::sync::MutexGuard<'_, ServiceScript> {
    script.lock().unwrap_or_else(|e| e.into_inner())
}

async fn record_and_reply(
    State(script): State<SharedServiceScript>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let next = {
        let mut script = lock_script(&script);
        script.received.push(ReceivedRequest {
            method,
            path: uri.path().to_string(),
            headers,
            body,
        });
        script.responses.pop_front()
    };

    let (status, body) =
        next.unwrap_or_else(|| (503, r#"{"detail": "no canned response left"}"#.to_string()));
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Base URL of a loopback port nobody listens on
pub async fn unused_base_url() -> std::io::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

/// A representative analysis result for tests
pub fn sample_result(diagram: Option<&str>) -> AnalysisResult {
    use mentor_core::{FunctionInfo, LibraryInfo};

    AnalysisResult {
        project_summary: "A small web service that greets users.".to_string(),
        libraries: vec![LibraryInfo {
            name: "flask".to_string(),
            explanation: "Serves the HTTP routes".to_string(),
        }],
        functions: vec![FunctionInfo {
            name: "greet".to_string(),
            purpose: "Builds the greeting".to_string(),
            inputs: "name: str".to_string(),
            outputs: "str".to_string(),
        }],
        execution_steps: "1. Start the server\n2. Visit /greet".to_string(),
        architecture_diagram: diagram.map(str::to_string),
    }
}
