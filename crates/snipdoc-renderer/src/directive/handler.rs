//! Directive handler trait.
//!
//! Directives are invoked with double-colon syntax: `::name[arguments]{options}`,
//! or with a body using the container form `:::name[arguments]` ... `:::`.

use std::collections::BTreeMap;

use super::{DirectiveContext, Node};
use crate::DirectiveError;

/// Declared invocation rules of a directive.
///
/// The processor checks these before calling [`Directive::run`], so handlers
/// never see an invocation with the wrong number of arguments, unknown options
/// or a body they did not ask for.
///
/// # Example
///
/// ```
/// use snipdoc_renderer::directive::DirectiveSpec;
///
/// let spec = DirectiveSpec::new(1, 0).with_final_argument_whitespace();
/// assert_eq!(spec.required_arguments, 1);
/// assert!(spec.final_argument_whitespace);
/// assert!(!spec.has_content);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectiveSpec {
    /// Number of required positional arguments.
    pub required_arguments: usize,
    /// Number of optional positional arguments after the required ones.
    pub optional_arguments: usize,
    /// Whether the final argument may contain whitespace.
    pub final_argument_whitespace: bool,
    /// Whether a body (container form) is permitted.
    pub has_content: bool,
    /// Accepted option names. Empty means no options are permitted.
    pub options: &'static [&'static str],
}

impl DirectiveSpec {
    #[must_use]
    pub const fn new(required_arguments: usize, optional_arguments: usize) -> Self {
        Self {
            required_arguments,
            optional_arguments,
            final_argument_whitespace: false,
            has_content: false,
            options: &[],
        }
    }

    #[must_use]
    pub const fn with_final_argument_whitespace(mut self) -> Self {
        self.final_argument_whitespace = true;
        self
    }

    #[must_use]
    pub const fn with_content(mut self) -> Self {
        self.has_content = true;
        self
    }

    #[must_use]
    pub const fn with_options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }
}

/// A validated directive invocation handed to [`Directive::run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Name the directive was invoked with.
    pub name: String,
    /// Positional arguments, split according to the directive's spec.
    pub arguments: Vec<String>,
    /// Options from `{key=value}`.
    pub options: BTreeMap<String, String>,
    /// Body lines of the container form (empty for the leaf form).
    pub content: Vec<String>,
}

impl Invocation {
    /// Get a positional argument by index.
    #[must_use]
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(String::as_str)
    }
}

/// Handler for a named directive.
///
/// Handlers are registered under a name through a
/// [`DirectiveRegistry`](super::DirectiveRegistry) and run once per occurrence
/// of that name in the source. They take `&self` and keep no per-invocation
/// state, so one registered handler can serve documents rendered in parallel.
///
/// # Example
///
/// ```
/// use snipdoc_renderer::DirectiveError;
/// use snipdoc_renderer::directive::{
///     Directive, DirectiveContext, DirectiveSpec, Invocation, Node,
/// };
///
/// struct YoutubeDirective;
///
/// impl Directive for YoutubeDirective {
///     fn spec(&self) -> DirectiveSpec {
///         DirectiveSpec::new(1, 0)
///     }
///
///     fn run(&self, invocation: &Invocation, _ctx: &DirectiveContext) -> Result<Vec<Node>, DirectiveError> {
///         let id = invocation.argument(0).unwrap_or_default();
///         Ok(vec![Node::raw_html(format!(
///             r#"<iframe src="https://www.youtube.com/embed/{id}"></iframe>"#
///         ))])
///     }
/// }
/// ```
pub trait Directive: Send + Sync {
    /// Invocation rules checked by the processor before [`run`](Self::run).
    fn spec(&self) -> DirectiveSpec;

    /// Run the directive and return the nodes to splice into the document.
    ///
    /// # Errors
    ///
    /// Errors are not recovered locally: the processor attaches the invocation
    /// site and aborts rendering of the document.
    fn run(
        &self,
        invocation: &Invocation,
        ctx: &DirectiveContext,
    ) -> Result<Vec<Node>, DirectiveError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    struct TestInclude;

    impl Directive for TestInclude {
        fn spec(&self) -> DirectiveSpec {
            DirectiveSpec::new(1, 0)
        }

        fn run(
            &self,
            invocation: &Invocation,
            ctx: &DirectiveContext,
        ) -> Result<Vec<Node>, DirectiveError> {
            let name = invocation.argument(0).unwrap_or_default();
            let content = ctx.read(Path::new(name))?;
            Ok(vec![Node::raw_html(content)])
        }
    }

    fn invocation(argument: &str) -> Invocation {
        Invocation {
            name: "include".to_owned(),
            arguments: vec![argument.to_owned()],
            ..Invocation::default()
        }
    }

    #[test]
    fn test_spec_builders() {
        let spec = DirectiveSpec::new(1, 2)
            .with_final_argument_whitespace()
            .with_content()
            .with_options(&["class"]);

        assert_eq!(spec.required_arguments, 1);
        assert_eq!(spec.optional_arguments, 2);
        assert!(spec.final_argument_whitespace);
        assert!(spec.has_content);
        assert_eq!(spec.options, &["class"]);
    }

    #[test]
    fn test_default_spec_permits_nothing() {
        let spec = DirectiveSpec::default();
        assert_eq!(spec, DirectiveSpec::new(0, 0));
        assert!(spec.options.is_empty());
    }

    #[test]
    fn test_run_success() {
        let ctx = DirectiveContext {
            source_path: None,
            line: 5,
            read_file: &|_| Ok("<b>Included</b>".to_owned()),
        };

        let nodes = TestInclude.run(&invocation("part.html"), &ctx).unwrap();
        assert_eq!(nodes, vec![Node::raw_html("<b>Included</b>")]);
    }

    #[test]
    fn test_run_failure_propagates_io_error() {
        let ctx = DirectiveContext {
            source_path: None,
            line: 10,
            read_file: &|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        };

        let err = TestInclude.run(&invocation("part.html"), &ctx).unwrap_err();
        let DirectiveError::Io(io_err) = err;
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_invocation_argument() {
        let invocation = invocation("hero");
        assert_eq!(invocation.argument(0), Some("hero"));
        assert_eq!(invocation.argument(1), None);
    }
}
