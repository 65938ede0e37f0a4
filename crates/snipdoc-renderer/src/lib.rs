//! Markdown renderer with pluggable directives.
//!
//! This crate is the host side of snipdoc: it parses directive syntax, keeps
//! the name-to-handler registry, validates invocations and renders markdown to
//! HTML with the nodes produced by directive handlers spliced in verbatim.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use snipdoc_renderer::{DirectiveError, MarkdownRenderer};
//! use snipdoc_renderer::directive::{
//!     Directive, DirectiveContext, DirectiveRegistry, DirectiveSpec, Directives, Invocation,
//!     Node,
//! };
//!
//! struct Hr;
//!
//! impl Directive for Hr {
//!     fn spec(&self) -> DirectiveSpec { DirectiveSpec::default() }
//!     fn run(&self, _: &Invocation, _: &DirectiveContext) -> Result<Vec<Node>, DirectiveError> {
//!         Ok(vec![Node::raw_html("<hr class=\"fancy\">")])
//!     }
//! }
//!
//! let mut directives = Directives::new();
//! directives.register_directive("hr", Arc::new(Hr)).unwrap();
//!
//! let result = MarkdownRenderer::new()
//!     .with_directives(directives)
//!     .render_markdown("# Title\n\n::hr\n")
//!     .unwrap();
//! assert_eq!(result.html, "<h1>Title</h1>\n<hr class=\"fancy\">\n");
//! ```

pub mod directive;
mod error;
mod renderer;

pub use error::{DirectiveError, RegistryError, RenderError};
pub use renderer::{MarkdownRenderer, RenderResult};
