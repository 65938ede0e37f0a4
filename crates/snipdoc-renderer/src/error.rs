//! Error types for directive handling and rendering.

use std::io;

use crate::directive::SourceLocation;

/// Error returned by a directive handler.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DirectiveError {
    /// File access failed (missing file, permission denied, other I/O error).
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Error returned when registering a directive.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A handler is already registered under this name.
    #[error("directive \"{0}\" is already registered")]
    Duplicate(String),
    /// The name cannot be used in directive syntax.
    #[error("invalid directive name \"{0}\"")]
    InvalidName(String),
}

/// Error that aborts rendering of a document.
///
/// Every variant carries the location of the offending invocation.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Wrong number of arguments; the handler was not run.
    #[error("{location}: invalid arguments for directive \"{name}\": {message}")]
    Arguments {
        location: SourceLocation,
        name: String,
        message: String,
    },
    /// Options supplied that the directive does not accept.
    #[error("{location}: invalid options for directive \"{name}\": {message}")]
    Options {
        location: SourceLocation,
        name: String,
        message: String,
    },
    /// Body supplied to a directive that takes no content.
    #[error("{location}: no content permitted for directive \"{name}\"")]
    Content {
        location: SourceLocation,
        name: String,
    },
    /// The handler failed.
    #[error("{location}: directive \"{name}\" failed: {source}")]
    Directive {
        location: SourceLocation,
        name: String,
        #[source]
        source: DirectiveError,
    },
}

impl RenderError {
    /// Location of the invocation that caused the error.
    #[must_use]
    pub fn location(&self) -> &SourceLocation {
        match self {
            Self::Arguments { location, .. }
            | Self::Options { location, .. }
            | Self::Content { location, .. }
            | Self::Directive { location, .. } => location,
        }
    }
}
