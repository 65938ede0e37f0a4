//! Name-to-handler registry for directives.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Directive;
use super::parser::is_valid_directive_name;
use crate::RegistryError;

/// Capability to register directives, exposed by the host to extensions.
///
/// Extensions receive `&mut dyn DirectiveRegistry` in their setup function
/// and register each directive name they provide exactly once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use snipdoc_renderer::{DirectiveError, RegistryError};
/// use snipdoc_renderer::directive::{
///     Directive, DirectiveContext, DirectiveRegistry, DirectiveSpec, Directives,
///     Invocation, Node,
/// };
///
/// struct Hr;
///
/// impl Directive for Hr {
///     fn spec(&self) -> DirectiveSpec { DirectiveSpec::default() }
///     fn run(&self, _: &Invocation, _: &DirectiveContext) -> Result<Vec<Node>, DirectiveError> {
///         Ok(vec![Node::raw_html("<hr>")])
///     }
/// }
///
/// fn setup(registry: &mut dyn DirectiveRegistry) -> Result<(), RegistryError> {
///     registry.register_directive("hr", Arc::new(Hr))
/// }
///
/// let mut directives = Directives::new();
/// setup(&mut directives).unwrap();
/// assert!(directives.contains("hr"));
/// assert!(setup(&mut directives).is_err());
/// ```
pub trait DirectiveRegistry {
    /// Bind `name` to `directive`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the name is already bound and
    /// [`RegistryError::InvalidName`] if it cannot appear in directive syntax.
    fn register_directive(
        &mut self,
        name: &str,
        directive: Arc<dyn Directive>,
    ) -> Result<(), RegistryError>;
}

/// Set of registered directives.
///
/// Cloning is cheap (handlers are shared), so one set built at start-up can
/// seed a [`DirectiveProcessor`](super::DirectiveProcessor) per document.
#[derive(Clone, Default)]
pub struct Directives {
    handlers: HashMap<String, Arc<dyn Directive>>,
}

impl Directives {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the handler registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Directive>> {
        self.handlers.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl DirectiveRegistry for Directives {
    fn register_directive(
        &mut self,
        name: &str,
        directive: Arc<dyn Directive>,
    ) -> Result<(), RegistryError> {
        if !is_valid_directive_name(name) {
            return Err(RegistryError::InvalidName(name.to_owned()));
        }
        if self.handlers.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_owned()));
        }
        self.handlers.insert(name.to_owned(), directive);
        Ok(())
    }
}

impl fmt::Debug for Directives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
