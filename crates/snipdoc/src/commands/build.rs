//! `snipdoc build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use rayon::prelude::*;
use snipdoc_config::{CliSettings, Config};
use snipdoc_renderer::MarkdownRenderer;

use super::load_directives;
use super::render::write_html;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for rendered HTML (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

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

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            templates_dir: self.templates_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;
        let templates_dir = &config.snippets_resolved.templates_dir;

        if !docs.source_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "Source directory not found: {}",
                docs.source_dir.display()
            )));
        }

        output.path("Source", &docs.source_dir);
        output.path("Output", &docs.output_dir);
        output.path("Templates", templates_dir);

        let renderer = MarkdownRenderer::new().with_directives(load_directives(templates_dir)?);
        let builder = SiteBuilder::new(&docs.source_dir, &docs.output_dir, renderer);
        let report = builder.build()?;

        for (page, warnings) in &report.warnings {
            output.page_warnings(page, warnings);
        }
        output.success(&format!(
            "Built {} page(s) into {}",
            report.pages,
            docs.output_dir.display()
        ));

        Ok(())
    }
}

/// Outcome of a successful build.
#[derive(Debug, Default)]
pub(crate) struct BuildReport {
    /// Number of pages written.
    pub pages: usize,
    /// Non-fatal warnings per page (path relative to the source dir). Pages
    /// without warnings are omitted.
    pub warnings: Vec<(PathBuf, Vec<String>)>,
}

/// Renders a tree of markdown files into a mirrored tree of HTML files.
pub(crate) struct SiteBuilder<'a> {
    source_dir: &'a Path,
    output_dir: &'a Path,
    renderer: MarkdownRenderer,
}

impl<'a> SiteBuilder<'a> {
    pub(crate) fn new(
        source_dir: &'a Path,
        output_dir: &'a Path,
        renderer: MarkdownRenderer,
    ) -> Self {
        Self {
            source_dir,
            output_dir,
            renderer,
        }
    }

    /// Render every page in parallel.
    ///
    /// Stops at the first failing page; pages already written are left in place.
    pub(crate) fn build(&self) -> Result<BuildReport, CliError> {
        let pages = scan_markdown(self.source_dir);
        tracing::info!(pages = pages.len(), "Building site");

        let warnings = pages
            .par_iter()
            .map(|page| self.build_page(page))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BuildReport {
            pages: pages.len(),
            warnings: pages
                .iter()
                .cloned()
                .zip(warnings)
                .filter(|(_, warnings)| !warnings.is_empty())
                .collect(),
        })
    }

    /// Render one page. `page` is relative to the source directory.
    fn build_page(&self, page: &Path) -> Result<Vec<String>, CliError> {
        let source = self.source_dir.join(page);
        let target = self.output_dir.join(page).with_extension("html");

        let markdown = fs::read_to_string(&source).map_err(|err| CliError::Read {
            path: source.clone(),
            source: err,
        })?;
        let result = self
            .renderer
            .clone()
            .with_source_path(&source)
            .render_markdown(&markdown)?;

        write_html(&target, &result.html)?;
        tracing::info!(source = %source.display(), target = %target.display(), "Rendered page");

        Ok(result.warnings)
    }
}

/// Find markdown files under `source_dir`, relative to it, sorted.
///
/// Hidden files and directories are skipped. Returns an empty Vec if the
/// directory doesn't exist.
pub(crate) fn scan_markdown(source_dir: &Path) -> Vec<PathBuf> {
    let mut pages = Vec::new();
    scan_directory(source_dir, Path::new(""), &mut pages);
    pages.sort();
    pages
}

fn scan_directory(dir_path: &Path, rel_prefix: &Path, pages: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir_path) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let rel_path = rel_prefix.join(&name);
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&entry.path(), &rel_path, pages);
        } else if rel_path.extension().is_some_and(|e| e == "md") {
            pages.push(rel_path);
        }
    }
}
