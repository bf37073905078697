//! Configuration file parsing for Code Mentor
//!
//! Settings come from `<config_dir>/code-mentor/config.toml` (or an explicit
//! path), then `MENTOR_API_URL`, then command line flags applied by the
//! binary.

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, default_config_path, init_config_file, load_settings, validate_settings,
    API_URL_ENV,
};
pub use types::*;
