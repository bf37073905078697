//! Request construction for the three analysis modes
//!
//! Validation turns the raw text of the active input field into an
//! [`AnalysisInput`]; [`RequestDescriptor::for_input`] is the pure mapping
//! from that input to endpoint, body encoding and headers.

use std::path::PathBuf;

use mentor_core::prelude::*;
use mentor_core::Mode;
use serde_json::json;

pub const REPO_REQUIRED: &str = "Please enter a GitHub repository URL.";
pub const CODE_REQUIRED: &str = "Please paste some code to analyze.";
pub const ZIP_REQUIRED: &str = "Please select a .zip file to analyze.";

/// Multipart field that carries the uploaded archive
pub const ZIP_FIELD: &str = "file";

pub const CONTENT_TYPE_JSON: (&str, &str) = ("Content-Type", "application/json");

/// Validated input for one analysis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    Repo { github_url: String },
    Snippet { code: String },
    Zip { path: PathBuf },
}

impl AnalysisInput {
    /// Validate the active field's raw value for `mode`
    ///
    /// Returns [`Error::Validation`] with the mode-specific message when the
    /// required input is missing.
    pub fn validate(mode: Mode, raw: &str) -> Result<Self> {
        match mode {
            Mode::Repo => {
                let url = raw.trim();
                if url.is_empty() {
                    return Err(Error::validation(REPO_REQUIRED));
                }
                Ok(Self::Repo {
                    github_url: url.to_string(),
                })
            }
            Mode::Snippet => {
                if raw.trim().is_empty() {
                    return Err(Error::validation(CODE_REQUIRED));
                }
                Ok(Self::Snippet {
                    code: raw.to_string(),
                })
            }
            Mode::Zip => {
                let path = raw.trim();
                if path.is_empty() || !path.to_ascii_lowercase().ends_with(".zip") {
                    return Err(Error::validation(ZIP_REQUIRED));
                }
                Ok(Self::Zip {
                    path: PathBuf::from(path),
                })
            }
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Repo { .. } => Mode::Repo,
            Self::Snippet { .. } => Mode::Snippet,
            Self::Zip { .. } => Mode::Zip,
        }
    }

    /// Short description for logs and headless events
    pub fn describe(&self) -> String {
        match self {
            Self::Repo { github_url } => github_url.clone(),
            Self::Snippet { code } => format!("{} lines of code", code.lines().count()),
            Self::Zip { path } => path.display().to_string(),
        }
    }
}

/// How the request body is encoded
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    /// Single file field; the transport computes the boundary and content type
    Multipart { field: &'static str, path: PathBuf },
}

/// Everything the transport needs to issue one analysis POST
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub endpoint: &'static str,
    pub body: RequestBody,
    /// Headers set explicitly. Empty for multipart so the boundary header
    /// computed by the transport is never overridden.
    pub headers: Vec<(&'static str, &'static str)>,
}

impl RequestDescriptor {
    pub fn for_input(input: &AnalysisInput) -> Self {
        let endpoint = input.mode().endpoint();
        match input {
            AnalysisInput::Repo { github_url } => Self {
                endpoint,
                body: RequestBody::Json(json!({ "github_url": github_url })),
                headers: vec![CONTENT_TYPE_JSON],
            },
            AnalysisInput::Snippet { code } => Self {
                endpoint,
                body: RequestBody::Json(json!({ "code": code })),
                headers: vec![CONTENT_TYPE_JSON],
            },
            AnalysisInput::Zip { path } => Self {
                endpoint,
                body: RequestBody::Multipart {
                    field: ZIP_FIELD,
                    path: path.clone(),
                },
                headers: Vec::new(),
            },
        }
    }

    /// Full request URL for a base such as `http://127.0.0.1:8000`
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.endpoint)
    }
}
