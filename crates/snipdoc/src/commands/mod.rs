//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod render;

pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;

use std::path::Path;

use snipdoc_renderer::directive::Directives;

use crate::error::CliError;

/// Register the extensions available to rendered documents.
///
/// Called once per process; the returned set is shared by every page.
pub(crate) fn load_directives(templates_dir: &Path) -> Result<Directives, CliError> {
    let mut directives = Directives::new();
    snipdoc_snippet::setup(&mut directives, templates_dir)?;

    if !templates_dir.is_dir() {
        tracing::warn!(
            templates_dir = %templates_dir.display(),
            "Templates directory does not exist, every snippet will fail to load"
        );
    }

    Ok(directives)
}
