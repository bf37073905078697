//! Standalone HTML page for the architecture diagram
//!
//! The terminal cannot show SVG, so the rendered diagram (or its failure
//! card) is written to a small page and handed to a browser.

use std::path::{Path, PathBuf};
use std::process::Command;

use mentor_client::{DiagramOutcome, RenderId};
use mentor_core::prelude::*;

const APP_DIR: &str = "code-mentor";

/// Where exported pages go: the user cache dir, else the temp dir
pub fn default_export_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("diagrams")
}

/// Build the page around the outcome's display markup
pub fn diagram_page(id: &RenderId, outcome: &DiagramOutcome) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Architecture Diagram - {id}</title>
<style>
  body {{
    margin: 0; padding: 2rem; background-color: #111827; font-family: system-ui, sans-serif;
  }}
  h1 {{ color: #e5e7eb; font-size: 1.25rem; font-weight: 600; }}
  .card {{ background-color: #ffffff; border-radius: 8px; padding: 1rem; overflow: auto; }}
</style>
</head>
<body>
<h1>Architecture Diagram</h1>
<div class="card" id="{id}-container">
{markup}
</div>
</body>
</html>
"#,
        id = id,
        markup = outcome.display_markup()
    )
}

/// Write the diagram page into `dir`, returning its path
pub fn write_diagram_page(dir: &Path, id: &RenderId, outcome: &DiagramOutcome) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.html", id));
    std::fs::write(&path, diagram_page(id, outcome))?;
    debug!("Wrote diagram page {}", path.display());
    Ok(path)
}

/// Open `path` with `browser`, or the platform default when empty
pub fn open_in_browser(path: &Path, browser: &str) -> std::io::Result<()> {
    if !browser.is_empty() {
        Command::new(browser).arg(path).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(path).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
        return Ok(());
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no browser opener available for this platform",
        ));
    }

    #[allow(unreachable_code)]
    Ok(())
}

/// Write the page and open it; the combined step run by the event loop
pub fn export_and_open(
    dir: &Path,
    id: &RenderId,
    outcome: &DiagramOutcome,
    browser: &str,
) -> Result<PathBuf> {
    let path = write_diagram_page(dir, id, outcome)?;
    open_in_browser(&path, browser)
        .map_err(|e| Error::terminal(format!("Failed to launch browser: {}", e)))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::GenerationCounter;
    use tempfile::tempdir;

    fn render_id() -> RenderId {
        RenderId::fresh(GenerationCounter::new().advance())
    }

    #[test]
    fn test_page_embeds_svg() {
        let outcome = DiagramOutcome::Rendered {
            markup: "<svg id=\"x\"><g/></svg>".into(),
        };
        let page = diagram_page(&render_id(), &outcome);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<svg id=\"x\"><g/></svg>"));
    }

    #[test]
    fn test_page_embeds_failure_card() {
        let outcome = DiagramOutcome::Failed {
            message: "Parse error on line 1".into(),
        };
        let page = diagram_page(&render_id(), &outcome);
        assert!(page.contains("Failed to render diagram:"));
        assert!(page.contains("Parse error on line 1"));
    }

    #[test]
    fn test_write_diagram_page_creates_dir() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("diagrams");
        let id = render_id();
        let outcome = DiagramOutcome::Rendered {
            markup: "<svg/>".into(),
        };

        let path = write_diagram_page(&target, &id, &outcome).unwrap();
        assert_eq!(path, target.join(format!("{}.html", id)));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("<svg/>"));
    }

    #[test]
    fn test_default_export_dir_is_app_scoped() {
        let dir = default_export_dir();
        assert!(dir.ends_with("code-mentor/diagrams"));
    }
}
