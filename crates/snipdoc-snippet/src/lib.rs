//! The `snippet` directive.
//!
//! Injects a pre-authored HTML fragment from a template directory into the
//! rendered document:
//!
//! ```markdown
//! ::snippet[hero]
//! ```
//!
//! reads `<templates_dir>/hero.html` and emits its contents as a raw HTML node,
//! byte for byte. Snippet files are trusted like documentation sources: their
//! contents are neither validated nor escaped.
//!
//! # Example
//!
//! ```
//! use snipdoc_renderer::MarkdownRenderer;
//! use snipdoc_renderer::directive::Directives;
//!
//! let templates = tempfile::tempdir().unwrap();
//! std::fs::write(templates.path().join("hero.html"), "<div>Hello</div>").unwrap();
//!
//! let mut directives = Directives::new();
//! snipdoc_snippet::setup(&mut directives, templates.path()).unwrap();
//!
//! let result = MarkdownRenderer::new()
//!     .with_directives(directives)
//!     .render_markdown("::snippet[hero]\n")
//!     .unwrap();
//! assert_eq!(result.html, "<div>Hello</div>\n");
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use snipdoc_renderer::directive::{
    Directive, DirectiveContext, DirectiveRegistry, DirectiveSpec, Invocation, Node,
};
use snipdoc_renderer::{DirectiveError, RegistryError};

/// Name the directive is registered under.
pub const DIRECTIVE_NAME: &str = "snippet";

/// File extension appended to snippet names.
const SNIPPET_EXTENSION: &str = "html";

/// Register the `snippet` directive, reading snippets from `templates_dir`.
///
/// # Errors
///
/// Returns [`RegistryError::Duplicate`] if `snippet` is already registered.
pub fn setup(
    registry: &mut dyn DirectiveRegistry,
    templates_dir: &Path,
) -> Result<(), RegistryError> {
    registry.register_directive(
        DIRECTIVE_NAME,
        Arc::new(SnippetDirective::new(templates_dir)),
    )?;
    tracing::debug!(templates_dir = %templates_dir.display(), "Registered snippet directive");
    Ok(())
}

/// Leaf directive emitting the contents of `<templates_dir>/<name>.html`.
///
/// Takes exactly one argument, the snippet name, which may contain spaces.
/// No options and no body are accepted.
#[derive(Debug, Clone)]
pub struct SnippetDirective {
    templates_dir: PathBuf,
}

impl SnippetDirective {
    #[must_use]
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Path of the file backing snippet `name`.
    ///
    /// ```
    /// use std::path::Path;
    /// use snipdoc_snippet::SnippetDirective;
    ///
    /// let directive = SnippetDirective::new("/srv/templates");
    /// assert_eq!(
    ///     directive.snippet_path("my snippet"),
    ///     Path::new("/srv/templates/my snippet.html")
    /// );
    /// ```
    #[must_use]
    pub fn snippet_path(&self, name: &str) -> PathBuf {
        self.templates_dir.join(format!("{name}.{SNIPPET_EXTENSION}"))
    }
}

impl Directive for SnippetDirective {
    fn spec(&self) -> DirectiveSpec {
        DirectiveSpec::new(1, 0).with_final_argument_whitespace()
    }

    fn run(
        &self,
        invocation: &Invocation,
        ctx: &DirectiveContext,
    ) -> Result<Vec<Node>, DirectiveError> {
        let name = invocation.argument(0).unwrap_or_default();
        let path = self.snippet_path(name);

        tracing::debug!(path = %path.display(), location = %ctx.location(), "Reading snippet");
        let content = ctx.read(&path)?;

        Ok(vec![Node::raw_html(content)])
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;

    use pretty_assertions::assert_eq;
    use snipdoc_renderer::directive::{DirectiveProcessor, Directives, RawNode};
    use snipdoc_renderer::{MarkdownRenderer, RenderError};
    use tempfile::TempDir;

    use super::*;

    fn templates(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn invocation(name: &str) -> Invocation {
        Invocation {
            name: DIRECTIVE_NAME.to_owned(),
            arguments: vec![name.to_owned()],
            ..Invocation::default()
        }
    }

    fn run(directive: &SnippetDirective, name: &str) -> Result<Vec<Node>, DirectiveError> {
        let read = |path: &Path| fs::read_to_string(path);
        let ctx = DirectiveContext {
            source_path: Some(Path::new("docs/index.md")),
            line: 1,
            read_file: &read,
        };
        directive.run(&invocation(name), &ctx)
    }

    fn processor(dir: &Path) -> DirectiveProcessor {
        let mut processor = DirectiveProcessor::new();
        setup(&mut processor, dir).unwrap();
        processor
    }

    #[test]
    fn test_emits_single_html_node() {
        let dir = templates(&[("hero.html", "<div>Hello</div>")]);

        let nodes = run(&SnippetDirective::new(dir.path()), "hero").unwrap();

        assert_eq!(
            nodes,
            vec![Node::Raw(RawNode::new("html", "<div>Hello</div>"))]
        );
    }

    #[test]
    fn test_content_is_verbatim() {
        let content = "<style>p > a { color: red; }</style>\n<p>&amp; <b>bold</b></p>\n\n<!-- x -->\n";
        let dir = templates(&[("raw.html", content)]);

        let nodes = run(&SnippetDirective::new(dir.path()), "raw").unwrap();

        assert_eq!(nodes[0].to_html(), Some(content));
    }

    #[test]
    fn test_name_with_whitespace() {
        let dir = templates(&[("my snippet.html", "<p>spaced</p>")]);

        let nodes = run(&SnippetDirective::new(dir.path()), "my snippet").unwrap();

        assert_eq!(nodes, vec![Node::raw_html("<p>spaced</p>")]);
    }

    #[test]
    fn test_missing_file_returns_io_error() {
        let dir = templates(&[]);

        let err = run(&SnippetDirective::new(dir.path()), "missing").unwrap_err();

        assert!(matches!(err, DirectiveError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    }

    #[test]
    fn test_idempotent() {
        let dir = templates(&[("cta.html", "<a href=\"/start\">Start</a>")]);
        let directive = SnippetDirective::new(dir.path());

        let first = run(&directive, "cta").unwrap();
        let second = run(&directive, "cta").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_spec() {
        let spec = SnippetDirective::new("templates").spec();

        assert_eq!(spec.required_arguments, 1);
        assert_eq!(spec.optional_arguments, 0);
        assert!(spec.final_argument_whitespace);
        assert!(!spec.has_content);
        assert!(spec.options.is_empty());
    }

    #[test]
    fn test_setup_registers_snippet() {
        let mut directives = Directives::new();
        setup(&mut directives, Path::new("templates")).unwrap();

        assert_eq!(directives.names(), vec!["snippet"]);
    }

    #[test]
    fn test_setup_twice_fails() {
        let mut directives = Directives::new();
        setup(&mut directives, Path::new("templates")).unwrap();

        let err = setup(&mut directives, Path::new("other")).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(ref name) if name == "snippet"));
    }

    #[test]
    fn test_missing_snippet_reports_location() {
        let dir = templates(&[]);
        let renderer = {
            let mut directives = Directives::new();
            setup(&mut directives, dir.path()).unwrap();
            MarkdownRenderer::new()
                .with_directives(directives)
                .with_source_path("docs/index.md")
        };

        let err = renderer
            .render_markdown("# Home\n\n::snippet[missing]\n")
            .unwrap_err();

        assert_eq!(err.location().to_string(), "docs/index.md:3");
        match err {
            RenderError::Directive { name, source, .. } => {
                assert_eq!(name, "snippet");
                assert!(matches!(source, DirectiveError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
            }
            other => panic!("expected directive error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_argument_rejected_before_run() {
        // An empty templates dir would make any read fail with NotFound
        let dir = templates(&[]);
        let mut processor = processor(dir.path());

        let err = processor.process("::snippet").unwrap_err();

        assert!(matches!(
            err,
            RenderError::Arguments { ref message, .. } if message == "1 argument(s) required, 0 supplied"
        ));
        assert!(processor.nodes().is_empty());
    }

    #[test]
    fn test_body_rejected() {
        let dir = templates(&[("hero.html", "<div>Hello</div>")]);
        let mut processor = processor(dir.path());

        let err = processor
            .process(":::snippet[hero]\nsome body\n:::")
            .unwrap_err();

        assert!(matches!(err, RenderError::Content { .. }));
    }

    #[test]
    fn test_options_rejected() {
        let dir = templates(&[("hero.html", "<div>Hello</div>")]);
        let mut processor = processor(dir.path());

        let err = processor.process("::snippet[hero]{class=wide}").unwrap_err();

        assert!(matches!(err, RenderError::Options { .. }));
    }

    #[test]
    fn test_rendered_in_document() {
        let dir = templates(&[
            ("hero.html", "<div class=\"hero\">\n\n<h1>Welcome</h1>\n\n</div>"),
            ("my snippet.html", "<span>inline</span>"),
        ]);
        let mut directives = Directives::new();
        setup(&mut directives, dir.path()).unwrap();

        let markdown = "::snippet[hero]\n\nSee ::snippet[my snippet] here.\n\n```\n::snippet[hero]\n```\n";
        let result = MarkdownRenderer::new()
            .with_directives(directives)
            .render_markdown(markdown)
            .unwrap();

        assert_eq!(
            result.html,
            "<div class=\"hero\">\n\n<h1>Welcome</h1>\n\n</div>\n\
             <p>See <span>inline</span> here.</p>\n\
             <pre><code>::snippet[hero]\n</code></pre>\n"
        );
    }

    #[test]
    fn test_code_samples_left_alone() {
        // No templates: any expansion would fail with NotFound
        let dir = templates(&[]);
        let mut directives = Directives::new();
        setup(&mut directives, dir.path()).unwrap();

        let markdown = "Use `::snippet[hero]` to embed.\n\nExample:\n\n    ::snippet[hero]\n";
        let result = MarkdownRenderer::new()
            .with_directives(directives)
            .render_markdown(markdown)
            .unwrap();

        assert_eq!(
            result.html,
            "<p>Use <code>::snippet[hero]</code> to embed.</p>\n\
             <p>Example:</p>\n\
             <pre><code>::snippet[hero]\n</code></pre>\n"
        );
    }
}
