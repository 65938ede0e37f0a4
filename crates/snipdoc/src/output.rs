//! Colored terminal output utilities.

use std::path::Path;

use console::{Style, Term};

/// Terminal output formatter.
///
/// Writes to stderr so rendered HTML on stdout stays clean.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Print a labelled path, e.g. `Templates: ./templates`.
    pub(crate) fn path(&self, label: &str, path: &Path) {
        let line = format!("{label}: {}", self.dim.apply_to(path.display()));
        let _ = self.term.write_line(&line);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print the warnings collected while rendering `page` (yellow).
    pub(crate) fn page_warnings(&self, page: &Path, warnings: &[String]) {
        for warning in warnings {
            let line = format!("Warning: {}: {warning}", page.display());
            let _ = self.term.write_line(&self.yellow.apply_to(line).to_string());
        }
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
