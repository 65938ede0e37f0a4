//! `snipdoc render` command implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use snipdoc_config::{CliSettings, Config};
use snipdoc_renderer::MarkdownRenderer;

use super::load_directives;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover snipdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snippet templates directory (overrides config).
    #[arg(short, long, env = "SNIPDOC_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            templates_dir: self.templates_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let html = render_file(&self.input, &config.snippets_resolved.templates_dir, &output)?;

        match self.output {
            Some(path) => {
                write_html(&path, &html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => io::stdout().lock().write_all(html.as_bytes())?,
        }

        Ok(())
    }
}

/// Render one markdown file, reporting warnings through `output`.
fn render_file(input: &Path, templates_dir: &Path, output: &Output) -> Result<String, CliError> {
    let markdown = fs::read_to_string(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let renderer = MarkdownRenderer::new()
        .with_directives(load_directives(templates_dir)?)
        .with_source_path(input);
    let result = renderer.render_markdown(&markdown)?;

    output.page_warnings(input, &result.warnings);

    Ok(result.html)
}

/// Write rendered HTML, creating parent directories as needed.
pub(crate) fn write_html(path: &Path, html: &str) -> Result<(), CliError> {
    let to_error = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, html).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use snipdoc_renderer::RenderError;

    #[test]
    fn test_render_file_with_snippet() {
        let dir = tempfile::tempdir().unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir(&templates).unwrap();
        fs::write(templates.join("hero.html"), "<div>Hello</div>").unwrap();
        let input = dir.path().join("index.md");
        fs::write(&input, "# Home\n\n::snippet[hero]\n").unwrap();

        let html = render_file(&input, &templates, &Output::new()).unwrap();

        assert_eq!(html, "<h1>Home</h1>\n<div>Hello</div>\n");
    }

    #[test]
    fn test_render_file_missing_snippet() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("index.md");
        fs::write(&input, "::snippet[missing]\n").unwrap();

        let err = render_file(&input, &dir.path().join("templates"), &Output::new()).unwrap_err();

        let CliError::Render(RenderError::Directive { location, .. }) = &err else {
            panic!("expected directive error, got {err:?}");
        };
        assert_eq!(location.path.as_deref(), Some(input.as_path()));
        assert_eq!(location.line, 1);
    }

    #[test]
    fn test_render_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.md");

        let err = render_file(&input, dir.path(), &Output::new()).unwrap_err();
        assert!(matches!(err, CliError::Read { ref path, .. } if path == &input));
    }

    #[test]
    fn test_write_html_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/page.html");

        write_html(&path, "<p>x</p>").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "<p>x</p>");
    }
}
