//! Analysis backend transport
//!
//! [`AnalysisBackend`] is the seam between the app layer and the network.
//! [`HttpBackend`] issues exactly one POST per call with reqwest; the
//! response is classified by [`interpret_response`], which is pure so the
//! status/body handling can be tested without a server.

use std::path::Path;
use std::time::Duration;

use mentor_core::error::UNKNOWN_SERVER_ERROR;
use mentor_core::prelude::*;
use mentor_core::AnalysisResult;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::request::{AnalysisInput, RequestBody, RequestDescriptor};

/// Default backend location of the analysis service
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default request timeout; repository analysis can take minutes
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Message shown when a success response does not hold an analysis
pub const UNEXPECTED_RESPONSE: &str = "The analysis service returned an unexpected response.";

/// Submits one analysis request and returns the parsed result
#[trait_variant::make(AnalysisBackend: Send)]
pub trait LocalAnalysisBackend {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult>;
}

/// reqwest-based backend talking to the analysis service over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend for `base_url` (must be an http or https URL)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = validate_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Issue the request described by `descriptor`, returning status and raw body
    async fn send(&self, descriptor: RequestDescriptor) -> Result<(u16, Vec<u8>)> {
        let url = descriptor.url(&self.base_url);
        let mut request = self.client.post(&url);
        for (name, value) in &descriptor.headers {
            request = request.header(*name, *value);
        }

        request = match descriptor.body {
            RequestBody::Json(value) => request.body(serde_json::to_vec(&value)?),
            RequestBody::Multipart { field, path } => {
                request.multipart(archive_form(field, &path).await?)
            }
        };

        debug!("POST {}", url);
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(transport_message(&e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response: {}", e)))?;

        debug!("POST {} -> {} ({} bytes)", url, status, body.len());
        Ok((status, body.to_vec()))
    }
}

impl AnalysisBackend for HttpBackend {
    async fn analyze(&self, input: &AnalysisInput) -> Result<AnalysisResult> {
        let descriptor = RequestDescriptor::for_input(input);
        let (status, body) = self.send(descriptor).await?;
        interpret_response(status, &body)
    }
}

/// Normalise and check the configured base URL
pub fn validate_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| Error::config_invalid(format!("invalid backend URL '{}': {}", base_url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(Error::config_invalid(format!(
            "backend URL must use http or https, got '{}'",
            other
        ))),
    }
}

/// Build the single-field multipart form holding the archive
///
/// An unreadable archive is reported before any network traffic, like a
/// missing selection.
async fn archive_form(field: &'static str, path: &Path) -> Result<Form> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        Error::validation(format!("Could not read {}: {}", path.display(), e))
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive.zip".to_string());

    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/zip")
        .map_err(|e| Error::transport(e.to_string()))?;

    Ok(Form::new().part(field, part))
}

fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "The analysis service did not respond in time.".to_string()
    } else if err.is_connect() {
        format!("Could not connect to the analysis service: {}", err)
    } else {
        err.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Classify a backend response
///
/// Non-success statuses become [`Error::Server`] carrying the body's
/// `detail` text, or [`UNKNOWN_SERVER_ERROR`] when there is none. Success
/// bodies must parse as an [`AnalysisResult`].
pub fn interpret_response(status: u16, body: &[u8]) -> Result<AnalysisResult> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| detail_message(&d))
            .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
        warn!("Analysis request failed with status {}: {}", status, message);
        return Err(Error::server(status, message));
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!("Could not parse analysis response: {}", e);
        Error::parse(UNEXPECTED_RESPONSE)
    })
}

/// Extract readable text from a `detail` value
///
/// Usually a string; validation failures from FastAPI-style services send a
/// list of `{ "msg": ... }` objects instead.
fn detail_message(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(|m| m.as_str()).map(str::to_string),
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_parses_result() {
        let body = br#"{
            "project_summary": "Summary",
            "libraries": [],
            "functions": [],
            "execution_steps": "run"
        }"#;
        let result = interpret_response(200, body).unwrap();
        assert_eq!(result.project_summary, "Summary");
        assert_eq!(result.execution_steps, "run");
    }

    #[test]
    fn test_error_status_uses_detail() {
        let err = interpret_response(422, br#"{"detail": "invalid syntax"}"#).unwrap_err();
        assert!(matches!(err, Error::Server { status: 422, .. }));
        assert_eq!(err.to_string(), "invalid syntax");
    }

    #[test]
    fn test_error_status_without_detail_uses_fallback() {
        let err = interpret_response(500, br#"{"error": "boom"}"#).unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_SERVER_ERROR);

        let err = interpret_response(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_SERVER_ERROR);

        let err = interpret_response(400, br#"{"detail": ""}"#).unwrap_err();
        assert_eq!(err.to_string(), UNKNOWN_SERVER_ERROR);
    }

    #[test]
    fn test_error_status_with_validation_list() {
        let body = br#"{"detail": [{"loc": ["body", "code"], "msg": "field required"}]}"#;
        let err = interpret_response(422, body).unwrap_err();
        assert_eq!(err.to_string(), "field required");
    }

    #[test]
    fn test_success_with_invalid_body_is_parse_error() {
        let err = interpret_response(200, b"not json").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert_eq!(err.to_string(), UNEXPECTED_RESPONSE);
    }

    #[test]
    fn test_validate_base_url() {
        assert_eq!(
            validate_base_url("http://127.0.0.1:8000/").unwrap(),
            "http://127.0.0.1:8000"
        );
        assert!(matches!(
            validate_base_url("ftp://example.com"),
            Err(Error::ConfigInvalid { .. })
        ));
        assert!(validate_base_url("not a url").is_err());
    }
}
