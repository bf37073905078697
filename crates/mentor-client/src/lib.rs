//! # mentor-client - Analysis Transport and Diagram Engines
//!
//! Talks to the outside world on behalf of the app layer: the remote
//! code-analysis service over HTTP, and the Mermaid renderer as a child
//! process.
//!
//! Depends on [`mentor_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Requests
//! - [`AnalysisInput`] - Validated input for one analysis
//! - [`RequestDescriptor`] - Endpoint, body encoding and headers per mode
//!
//! ### Backend
//! - [`AnalysisBackend`] - Async trait the app layer calls
//! - [`HttpBackend`] - reqwest implementation
//! - [`interpret_response()`] - Status/body classification
//!
//! ### Diagrams
//! - [`DiagramEngine`] - Async render contract `(id, description) -> SVG`
//! - [`MermaidCliEngine`] - Renders with the `mmdc` CLI
//! - [`DiagramOutcome`], [`RenderId`]

pub mod backend;
pub mod diagram;
pub mod request;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use backend::{
    interpret_response, validate_base_url, AnalysisBackend, HttpBackend, LocalAnalysisBackend,
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
pub use diagram::{
    DiagramEngine, DiagramOutcome, LocalDiagramEngine, MermaidCliEngine, RenderId,
    DEFAULT_MMDC_COMMAND, DEFAULT_RENDER_TIMEOUT_SECS, DEFAULT_THEME,
};
pub use request::{AnalysisInput, RequestBody, RequestDescriptor};
