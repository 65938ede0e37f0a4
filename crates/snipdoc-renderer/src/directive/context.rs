//! Directive processing context.
//!
//! Provides file system access and source location information to directive handlers.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Location of a directive invocation in source markup.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use snipdoc_renderer::directive::SourceLocation;
///
/// let location = SourceLocation::new(Some(PathBuf::from("docs/index.md")), 12);
/// assert_eq!(location.to_string(), "docs/index.md:12");
///
/// let location = SourceLocation::new(None, 3);
/// assert_eq!(location.to_string(), "line 3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file, if known.
    pub path: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
}

impl SourceLocation {
    #[must_use]
    pub fn new(path: Option<PathBuf>, line: usize) -> Self {
        Self { path, line }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}:{}", path.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

/// Context provided to directive handlers for file system access and source location.
///
/// The context is created by [`DirectiveProcessor`](super::DirectiveProcessor) for each
/// invocation and provides:
///
/// - Source file information for error messages
/// - File reading callback for snippet-style directives
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use snipdoc_renderer::directive::DirectiveContext;
///
/// let ctx = DirectiveContext {
///     source_path: Some(Path::new("docs/guide.md")),
///     line: 42,
///     read_file: &|path| std::fs::read_to_string(path),
/// };
///
/// assert_eq!(ctx.location().to_string(), "docs/guide.md:42");
/// ```
pub struct DirectiveContext<'a> {
    /// Path to the source file being rendered (if known).
    pub source_path: Option<&'a Path>,
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
    /// Callback to read a file from the file system.
    pub read_file: &'a dyn Fn(&Path) -> io::Result<String>,
}

impl DirectiveContext<'_> {
    /// Read a file using the context's `read_file` callback.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, path: &Path) -> io::Result<String> {
        (self.read_file)(path)
    }

    /// Source location of the invocation.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.source_path.map(Path::to_path_buf), self.line)
    }
}
