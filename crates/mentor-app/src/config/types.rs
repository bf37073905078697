//! Configuration types for Code Mentor
//!
//! Every field has a serde default, so a partial file fills the rest from
//! the defaults below.

use mentor_client::{
    DEFAULT_BASE_URL, DEFAULT_MMDC_COMMAND, DEFAULT_RENDER_TIMEOUT_SECS, DEFAULT_THEME,
    DEFAULT_TIMEOUT_SECS,
};
use mentor_core::Mode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Global application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub diagram: DiagramSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Analysis service connection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout; repository analysis is slow
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Mermaid renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiagramSettings {
    /// Mermaid CLI executable, looked up on PATH
    #[serde(default = "default_command")]
    pub command: String,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self {
            command: default_command(),
            theme: default_theme(),
            render_timeout_secs: default_render_timeout_secs(),
        }
    }
}

impl DiagramSettings {
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

fn default_command() -> String {
    DEFAULT_MMDC_COMMAND.to_string()
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_render_timeout_secs() -> u64 {
    DEFAULT_RENDER_TIMEOUT_SECS
}

/// UI settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Mode selected at startup
    #[serde(default)]
    pub default_mode: Mode,

    /// Browser used to open exported diagrams (empty = platform default)
    #[serde(default)]
    pub browser: String,
}
