//! Command-line arguments and how they layer over the config file

use std::path::PathBuf;

use clap::Parser;
use mentor_app::config::{apply_env_overrides, load_settings};
use mentor_app::Settings;
use mentor_core::prelude::*;
use mentor_core::Mode;

/// Code Mentor - understand a codebase from your terminal
#[derive(Parser, Debug)]
#[command(name = "mentor")]
#[command(about = "Terminal client for an AI code-analysis service", long_about = None)]
pub struct Args {
    /// Base URL of the analysis service (overrides config and MENTOR_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Initial input mode: repo, snippet or zip
    #[arg(long, value_name = "MODE")]
    pub mode: Option<Mode>,

    /// GitHub repository URL to analyze
    #[arg(long, value_name = "URL", conflicts_with_all = ["code_file", "zip"])]
    pub repo: Option<String>,

    /// File whose contents are analyzed as a snippet
    #[arg(long, value_name = "PATH", conflicts_with = "zip")]
    pub code_file: Option<PathBuf>,

    /// Zip archive to upload
    #[arg(long, value_name = "PATH")]
    pub zip: Option<PathBuf>,

    /// Run one analysis without the TUI (NDJSON events on stdout)
    #[arg(long)]
    pub headless: bool,

    /// Write the rendered architecture diagram (SVG) here in headless mode
    #[arg(long, value_name = "PATH", requires = "headless")]
    pub diagram_out: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Resolve settings: file, then environment, then flags
    pub fn settings(&self) -> Settings {
        let mut settings = load_settings(self.config.as_deref());
        apply_env_overrides(&mut settings);
        self.apply_overrides(&mut settings);
        settings
    }

    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(url) = &self.api_url {
            settings.backend.base_url = url.clone();
        }
        if let Some(mode) = self.mode {
            settings.ui.default_mode = mode;
        }
    }

    /// Input to place in a field before the first frame, selecting its mode
    pub fn prefill(&self) -> Result<Option<(Mode, String)>> {
        if let Some(url) = &self.repo {
            return Ok(Some((Mode::Repo, url.clone())));
        }
        if let Some(path) = &self.code_file {
            let code = std::fs::read_to_string(path).map_err(|e| {
                Error::config(format!("Could not read {}: {}", path.display(), e))
            })?;
            return Ok(Some((Mode::Snippet, code)));
        }
        if let Some(path) = &self.zip {
            return Ok(Some((Mode::Zip, path.display().to_string())));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mentor").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_settings() {
        let args = parse(&["--api-url", "http://analysis.local:9000", "--mode", "zip"]);
        let mut settings = Settings::default();
        args.apply_overrides(&mut settings);

        assert_eq!(settings.backend.base_url, "http://analysis.local:9000");
        assert_eq!(settings.ui.default_mode, Mode::Zip);
    }

    #[test]
    fn test_no_flags_keep_settings() {
        let args = parse(&[]);
        let mut settings = Settings::default();
        args.apply_overrides(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = Args::try_parse_from(["mentor", "--mode", "tarball"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_repo_prefill() {
        let args = parse(&["--repo", "https://github.com/user/repo"]);
        assert_eq!(
            args.prefill().unwrap(),
            Some((Mode::Repo, "https://github.com/user/repo".to_string()))
        );
    }

    #[test]
    fn test_code_file_prefill_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.py");
        std::fs::write(&path, "print('hi')\n").unwrap();

        let args = parse(&["--code-file", path.to_str().unwrap()]);
        assert_eq!(
            args.prefill().unwrap(),
            Some((Mode::Snippet, "print('hi')\n".to_string()))
        );
    }

    #[test]
    fn test_missing_code_file_is_error() {
        let args = parse(&["--code-file", "/definitely/not/here.py"]);
        assert!(args.prefill().is_err());
    }

    #[test]
    fn test_prefill_flags_conflict() {
        let result = Args::try_parse_from([
            "mentor",
            "--repo",
            "https://github.com/user/repo",
            "--zip",
            "project.zip",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_diagram_out_requires_headless() {
        assert!(Args::try_parse_from(["mentor", "--diagram-out", "arch.svg"]).is_err());
        let args = parse(&["--headless", "--diagram-out", "arch.svg"]);
        assert_eq!(args.diagram_out, Some(PathBuf::from("arch.svg")));
    }
}
