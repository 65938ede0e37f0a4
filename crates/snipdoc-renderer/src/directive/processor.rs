//! Directive processor.
//!
//! Handles preprocessing (before pulldown-cmark) and post-processing (after rendering).

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::fence::{CodeRanges, FenceTracker};
use super::parser::{LeafMatch, ParsedDirective, parse_container_line, parse_line};
use super::{
    Directive, DirectiveArgs, DirectiveContext, DirectiveRegistry, Directives, Invocation, Node,
    Replacements, SourceLocation,
};
use crate::{RegistryError, RenderError};

/// Type alias for the file reading callback function.
pub type ReadFileFn = dyn Fn(&Path) -> io::Result<String> + Send;

/// Configuration for the directive processor.
pub struct DirectiveProcessorConfig {
    /// Path to the source file being rendered (if known).
    pub source_path: Option<PathBuf>,
    /// Callback to read files from the file system.
    ///
    /// Default: `std::fs::read_to_string`
    pub read_file: Option<Box<ReadFileFn>>,
}

impl Default for DirectiveProcessorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            source_path: None,
            read_file: None,
        }
    }

    /// Set the source file path used in error locations.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Set the file reading callback.
    #[must_use]
    pub fn with_read_file<F>(mut self, read_file: F) -> Self
    where
        F: Fn(&Path) -> io::Result<String> + Send + 'static,
    {
        self.read_file = Some(Box::new(read_file));
        self
    }

    fn create_context(&self, line: usize) -> DirectiveContext<'_> {
        DirectiveContext {
            source_path: self.source_path.as_deref(),
            line,
            read_file: self.read_file.as_ref().map_or_else(
                || &default_read_file as &dyn Fn(&Path) -> io::Result<String>,
                |f| f.as_ref(),
            ),
        }
    }

    fn location(&self, line: usize) -> SourceLocation {
        SourceLocation::new(self.source_path.clone(), line)
    }
}

/// Default file reading function.
fn default_read_file(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}

/// Processor for directive syntax.
///
/// Create one processor per document. Handlers are shared through
/// [`Directives`], while emitted nodes and warnings belong to the document.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use snipdoc_renderer::DirectiveError;
/// use snipdoc_renderer::directive::{
///     Directive, DirectiveContext, DirectiveProcessor, DirectiveRegistry, DirectiveSpec,
///     Invocation, Node,
/// };
///
/// struct Badge;
///
/// impl Directive for Badge {
///     fn spec(&self) -> DirectiveSpec {
///         DirectiveSpec::new(1, 0).with_final_argument_whitespace()
///     }
///
///     fn run(&self, invocation: &Invocation, _ctx: &DirectiveContext) -> Result<Vec<Node>, DirectiveError> {
///         Ok(vec![Node::raw_html(format!(
///             "<span class=\"badge\">{}</span>",
///             invocation.argument(0).unwrap_or_default()
///         ))])
///     }
/// }
///
/// let mut processor = DirectiveProcessor::new();
/// processor.register_directive("badge", Arc::new(Badge)).unwrap();
///
/// let mut output = processor.process("Status: ::badge[beta]").unwrap();
/// processor.post_process(&mut output);
/// assert_eq!(output, "Status: <span class=\"badge\">beta</span>");
/// ```
pub struct DirectiveProcessor {
    config: DirectiveProcessorConfig,
    directives: Directives,
    fence: FenceTracker,
    /// Nodes emitted so far, indexed by placeholder number.
    nodes: Vec<Node>,
    /// Depth of unhandled container blocks passed through unchanged.
    passthrough_depth: usize,
    warnings: Vec<String>,
}

impl Default for DirectiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessor {
    /// Create a new directive processor with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DirectiveProcessorConfig::default())
    }

    /// Create a new directive processor with custom configuration.
    #[must_use]
    pub fn with_config(config: DirectiveProcessorConfig) -> Self {
        Self {
            config,
            directives: Directives::new(),
            fence: FenceTracker::new(),
            nodes: Vec::new(),
            passthrough_depth: 0,
            warnings: Vec::new(),
        }
    }

    /// Use an already populated set of directives.
    #[must_use]
    pub fn with_directives(mut self, directives: Directives) -> Self {
        self.directives = directives;
        self
    }

    /// Registered directives.
    #[must_use]
    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    /// Preprocess markdown, replacing each directive invocation with placeholders
    /// for the nodes it produced.
    ///
    /// Unregistered directive names are passed through unchanged, as is
    /// directive syntax inside fenced or indented code blocks and inline code
    /// spans.
    ///
    /// # Errors
    ///
    /// Returns the first [`RenderError`]; no partial output is produced.
    pub fn process(&mut self, input: &str) -> Result<String, RenderError> {
        self.fence = FenceTracker::new();
        self.passthrough_depth = 0;

        let code = CodeRanges::new(input);
        let mut output = String::with_capacity(input.len());
        let lines: Vec<&str> = input.lines().collect();
        let offsets: Vec<usize> = input
            .split_inclusive('\n')
            .scan(0, |start, segment| {
                let offset = *start;
                *start += segment.len();
                Some(offset)
            })
            .collect();
        let line_count = lines.len();
        let mut idx = 0;

        while idx < line_count {
            let line = lines[idx];
            let line_num = idx + 1;
            let offset = offsets[idx];

            self.fence.update(line);

            let indent = line.len() - line.trim_start().len();
            let processed = if self.fence.in_fence() {
                line.to_owned()
            } else if let Some(directive) =
                parse_container_line(line).filter(|_| !code.contains(offset + indent))
            {
                let (processed, consumed) =
                    self.dispatch_container(line, directive, &lines[idx + 1..], line_num)?;
                idx += consumed;
                processed
            } else {
                self.process_leaf_directives(line, line_num, offset, &code)?
            };

            output.push_str(&processed);

            // Preserve line endings
            if idx < line_count - 1 || input.ends_with('\n') {
                output.push('\n');
            }
            idx += 1;
        }

        Ok(output)
    }

    /// Expand leaf directives in one line. `offset` is the line's byte offset
    /// in the document, used to skip matches inside inline code.
    fn process_leaf_directives(
        &mut self,
        line: &str,
        line_num: usize,
        offset: usize,
        code: &CodeRanges,
    ) -> Result<String, RenderError> {
        let mut result = String::with_capacity(line.len());
        let mut remaining = line;

        while let Some(LeafMatch {
            name,
            args,
            start,
            end,
        }) = parse_line(remaining)
        {
            result.push_str(&remaining[..start]);
            let pos = offset + (line.len() - remaining.len()) + start;

            match self.directives.get(&name).map(Arc::clone) {
                Some(_) if code.contains(pos) => result.push_str(&remaining[start..end]),
                Some(handler) => {
                    let expanded = self.invoke(&handler, &name, args, &[], line_num)?;
                    result.push_str(&expanded);
                }
                // Not registered, pass through unchanged
                None => result.push_str(&remaining[start..end]),
            }

            remaining = &remaining[end..];
        }

        result.push_str(remaining);
        Ok(result)
    }

    /// Handle a container line. Returns the output and the number of following
    /// lines consumed as the body (plus the closing line).
    fn dispatch_container(
        &mut self,
        line: &str,
        directive: ParsedDirective,
        rest: &[&str],
        line_num: usize,
    ) -> Result<(String, usize), RenderError> {
        match directive {
            ParsedDirective::ContainerStart {
                name,
                args,
                colon_count,
            } => {
                let Some(handler) = self.directives.get(&name).map(Arc::clone) else {
                    // No handler, pass through unchanged
                    self.passthrough_depth += 1;
                    return Ok((line.to_owned(), 0));
                };

                let (body_len, closed) = find_container_end(rest, colon_count);
                if !closed {
                    self.warnings.push(format!(
                        "line {line_num}: unclosed directive block :::{name} (missing closing :::)"
                    ));
                }
                let expanded = self.invoke(&handler, &name, args, &rest[..body_len], line_num)?;
                Ok((expanded, body_len + usize::from(closed)))
            }
            ParsedDirective::ContainerEnd { .. } => {
                if self.passthrough_depth > 0 {
                    self.passthrough_depth -= 1;
                } else {
                    self.warnings.push(format!(
                        "line {line_num}: stray ::: with no opening directive"
                    ));
                }
                Ok((line.to_owned(), 0))
            }
        }
    }

    /// Validate an invocation against the handler's spec, run it and stash the
    /// produced nodes. Returns the placeholders to splice into the output.
    fn invoke(
        &mut self,
        handler: &Arc<dyn Directive>,
        name: &str,
        args: DirectiveArgs,
        body: &[&str],
        line_num: usize,
    ) -> Result<String, RenderError> {
        let spec = handler.spec();
        let location = || self.config.location(line_num);

        let arguments = args.arguments(&spec).map_err(|message| RenderError::Arguments {
            location: location(),
            name: name.to_owned(),
            message,
        })?;

        if let Some(key) = args.options.keys().find(|key| !spec.options.contains(&key.as_str())) {
            let message = if spec.options.is_empty() {
                "no options permitted".to_owned()
            } else {
                format!("unknown option \"{key}\"")
            };
            return Err(RenderError::Options {
                location: location(),
                name: name.to_owned(),
                message,
            });
        }

        if !spec.has_content && body.iter().any(|line| !line.trim().is_empty()) {
            return Err(RenderError::Content {
                location: location(),
                name: name.to_owned(),
            });
        }

        let invocation = Invocation {
            name: name.to_owned(),
            arguments,
            options: args.options,
            content: body.iter().map(|line| (*line).to_owned()).collect(),
        };

        let ctx = self.config.create_context(line_num);
        let nodes = handler
            .run(&invocation, &ctx)
            .map_err(|source| RenderError::Directive {
                location: location(),
                name: name.to_owned(),
                source,
            })?;

        tracing::debug!(
            directive = name,
            line = line_num,
            nodes = nodes.len(),
            "Expanded directive"
        );

        let mut placeholders = String::new();
        for node in nodes {
            placeholders.push_str(&Replacements::placeholder(self.nodes.len()));
            self.nodes.push(node);
        }
        Ok(placeholders)
    }

    /// Post-process rendered HTML, substituting every node placeholder with
    /// the node's HTML.
    ///
    /// Nodes without an HTML rendering (raw nodes for other formats) are dropped.
    pub fn post_process(&self, html: &mut String) {
        let mut replacements = Replacements::with_capacity(self.nodes.len());

        for (index, node) in self.nodes.iter().enumerate() {
            let content = node.to_html().unwrap_or_else(|| {
                tracing::debug!(index, "Dropping node without HTML output");
                ""
            });
            replacements.push(content);
        }

        replacements.apply(html);
    }

    /// Nodes emitted so far, in document order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Non-fatal problems found while processing (stray or unclosed blocks).
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl DirectiveRegistry for DirectiveProcessor {
    fn register_directive(
        &mut self,
        name: &str,
        directive: Arc<dyn Directive>,
    ) -> Result<(), RegistryError> {
        self.directives.register_directive(name, directive)
    }
}

/// Find the closing line of a container body.
///
/// Returns the number of body lines and whether a closing `:::` (at least as
/// long as the opening) was found. Nested containers and fenced code are
/// skipped.
fn find_container_end(lines: &[&str], colon_count: usize) -> (usize, bool) {
    let mut fence = FenceTracker::new();
    let mut depth = 0usize;

    for (idx, line) in lines.iter().enumerate() {
        fence.update(line);
        if fence.in_fence() {
            continue;
        }
        match parse_container_line(line) {
            Some(ParsedDirective::ContainerStart { .. }) => depth += 1,
            Some(ParsedDirective::ContainerEnd { colon_count: count }) => {
                if depth == 0 && count >= colon_count {
                    return (idx, true);
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    (lines.len(), false)
}
