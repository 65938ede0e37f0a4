//! Markdown to HTML rendering with directive expansion.

use std::path::PathBuf;

use pulldown_cmark::{Options, Parser, html};

use crate::RenderError;
use crate::directive::{DirectiveProcessor, DirectiveProcessorConfig, Directives};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Warnings generated during conversion (e.g., unclosed directive blocks).
    pub warnings: Vec<String>,
}

/// Markdown renderer.
///
/// Each call to [`render_markdown`](Self::render_markdown) runs a fresh
/// [`DirectiveProcessor`] seeded with the registered directives, so one
/// renderer can be reused for many documents.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    directives: Directives,
    source_path: Option<PathBuf>,
    gfm: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a new renderer with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            directives: Directives::new(),
            source_path: None,
            gfm: true,
        }
    }

    /// Set the directives available to rendered documents.
    #[must_use]
    pub fn with_directives(mut self, directives: Directives) -> Self {
        self.directives = directives;
        self
    }

    /// Set the path of the document being rendered, used in error locations.
    #[must_use]
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to HTML.
    ///
    /// Directives are expanded before parsing; their nodes are substituted
    /// into the rendered HTML afterwards, byte for byte.
    ///
    /// # Errors
    ///
    /// Returns the first [`RenderError`] raised by a directive invocation.
    /// Nothing is rendered in that case.
    pub fn render_markdown(&self, markdown: &str) -> Result<RenderResult, RenderError> {
        let mut config = DirectiveProcessorConfig::new();
        if let Some(path) = &self.source_path {
            config = config.with_source_path(path.clone());
        }
        let mut processor =
            DirectiveProcessor::with_config(config).with_directives(self.directives.clone());

        let preprocessed = processor.process(markdown)?;

        let mut output = String::with_capacity(preprocessed.len() * 3 / 2);
        html::push_html(&mut output, Parser::new_ext(&preprocessed, self.parser_options()));

        processor.post_process(&mut output);

        for warning in processor.warnings() {
            tracing::warn!(path = ?self.source_path, "{warning}");
        }

        Ok(RenderResult {
            html: output,
            warnings: processor.warnings().to_vec(),
        })
    }
}
