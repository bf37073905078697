//! Settings loading for `<config_dir>/code-mentor/config.toml`

use super::types::Settings;
use mentor_core::prelude::*;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "code-mentor";
const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable overriding `backend.base_url`
pub const API_URL_ENV: &str = "MENTOR_API_URL";

const DEFAULT_CONFIG: &str = r#"# Code Mentor Configuration

[backend]
base_url = "http://127.0.0.1:8000"   # analysis service; MENTOR_API_URL overrides
timeout_secs = 300

[diagram]
command = "mmdc"                     # Mermaid CLI (npm install -g @mermaid-js/mermaid-cli)
theme = "dark"
render_timeout_secs = 30

[ui]
default_mode = "repo"                # repo, snippet or zip
browser = ""                         # empty = platform default
"#;

/// Default location of the config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `path`, or from the default location when `None`
///
/// A missing or unreadable file yields defaults; problems are logged, never
/// fatal.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => {
                debug!("No config directory on this platform, using defaults");
                return Settings::default();
            }
        },
    };

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Apply `MENTOR_API_URL` on top of file settings
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(url) = std::env::var(API_URL_ENV) {
        let url = url.trim();
        if !url.is_empty() {
            debug!("{} overrides backend URL with {}", API_URL_ENV, url);
            settings.backend.base_url = url.to_string();
        }
    }
}

/// Check values that would only fail later, at request time
pub fn validate_settings(settings: &Settings) -> Result<()> {
    mentor_client::validate_base_url(&settings.backend.base_url)?;

    if settings.backend.timeout_secs == 0 {
        return Err(Error::config_invalid("backend.timeout_secs must be positive"));
    }
    if settings.diagram.command.trim().is_empty() {
        return Err(Error::config_invalid("diagram.command must not be empty"));
    }
    Ok(())
}

/// Write a commented default config file at `path` unless one exists
pub fn init_config_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", parent, e)))?;
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write {:?}: {}", path, e)))?;
    info!("Created default config at {:?}", path);
    Ok(())
}
