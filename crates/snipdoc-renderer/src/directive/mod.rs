//! Pluggable directives API for CommonMark directive syntax.
//!
//! Extensions implement [`Directive`] and register it under a name through the
//! [`DirectiveRegistry`] capability. Handlers declare their argument rules as
//! data ([`DirectiveSpec`]); the processor validates every invocation against
//! them before the handler runs.
//!
//! # Syntax
//!
//! - **Leaf**: `::name[arguments]{options}` anywhere in a line
//! - **Container**: `:::name[arguments]{options}` ... `:::` on whole lines, the
//!   lines in between form the directive body
//!
//! Directive syntax inside fenced code blocks is left untouched, as are
//! invocations of names nobody registered.
//!
//! # Architecture
//!
//! The directive system uses a two-phase processing model:
//!
//! 1. **Preprocessing** ([`DirectiveProcessor::process`]): Runs handlers and
//!    replaces each invocation with placeholders (HTML comments) that pass
//!    through pulldown-cmark unchanged.
//!
//! 2. **Post-processing** ([`DirectiveProcessor::post_process`]): Substitutes
//!    placeholders with the emitted nodes using the [`Replacements`] collector
//!    for single-pass string replacement.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use snipdoc_renderer::DirectiveError;
//! use snipdoc_renderer::directive::{
//!     Directive, DirectiveContext, DirectiveProcessor, DirectiveRegistry, DirectiveSpec,
//!     Invocation, Node,
//! };
//!
//! struct Kbd;
//!
//! impl Directive for Kbd {
//!     fn spec(&self) -> DirectiveSpec {
//!         DirectiveSpec::new(1, 0)
//!     }
//!
//!     fn run(&self, invocation: &Invocation, _ctx: &DirectiveContext) -> Result<Vec<Node>, DirectiveError> {
//!         let key = invocation.argument(0).unwrap_or_default();
//!         Ok(vec![Node::raw_html(format!("<kbd>{key}</kbd>"))])
//!     }
//! }
//!
//! let mut processor = DirectiveProcessor::new();
//! processor.register_directive("kbd", Arc::new(Kbd)).unwrap();
//!
//! let mut output = processor.process("Press ::kbd[Ctrl] to copy.").unwrap();
//! processor.post_process(&mut output);
//! assert_eq!(output, "Press <kbd>Ctrl</kbd> to copy.");
//! ```

mod args;
mod context;
mod fence;
mod handler;
mod node;
mod parser;
mod processor;
mod registry;
mod replacements;

pub use args::DirectiveArgs;
pub use context::{DirectiveContext, SourceLocation};
pub use handler::{Directive, DirectiveSpec, Invocation};
pub use node::{HTML_FORMAT, Node, RawNode};
pub use processor::{DirectiveProcessor, DirectiveProcessorConfig, ReadFileFn};
pub use registry::{DirectiveRegistry, Directives};
pub use replacements::Replacements;
