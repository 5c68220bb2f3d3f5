//! Strict-undefined rendering.
//!
//! Every call compiles the template into a fresh registry, so nothing
//! survives between renders and a broken template cannot poison the next
//! one. The context is only borrowed.

use crate::catalog::TemplateCatalog;
use crate::{RenderError, RenderResult, helpers};
use handlebars::{Handlebars, RenderErrorReason};
use tbgen_core::TestbenchContext;
use tracing::{debug, warn};

/// Renders catalog templates against a [`TestbenchContext`].
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    catalog: TemplateCatalog,
}

impl TemplateRenderer {
    pub fn new(catalog: TemplateCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Render `template_name` against `context`.
    ///
    /// Fails without output on an unknown template, a syntax error, or any
    /// reference the context does not define.
    pub fn render(&self, template_name: &str, context: &TestbenchContext) -> RenderResult<String> {
        let source = self.catalog.get(template_name)?;
        render_source(template_name, source, context)
    }
}

/// Compile and evaluate one template source in strict mode.
pub(crate) fn render_source(
    name: &str,
    source: &str,
    context: &TestbenchContext,
) -> RenderResult<String> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Output is source code, not HTML.
    registry.register_escape_fn(handlebars::no_escape);
    helpers::register(&mut registry);

    registry
        .register_template_string(name, source)
        .map_err(|e| RenderError::Syntax {
            name: name.to_string(),
            detail: e.to_string(),
        })?;

    let text = registry.render(name, context).map_err(|e| classify(name, e))?;
    debug!(template = %name, bytes = text.len(), "Rendered template");
    Ok(text)
}

fn classify(name: &str, err: handlebars::RenderError) -> RenderError {
    let location = match (err.line_no, err.column_no) {
        (Some(line), Some(col)) => format!(" at line {line}, column {col}"),
        _ => String::new(),
    };
    warn!(template = %name, error = %err, "Render failed");

    match err.reason() {
        RenderErrorReason::MissingVariable(path) => RenderError::Undefined {
            name: name.to_string(),
            detail: match path {
                Some(path) => format!("undefined reference `{path}`{location}"),
                None => err.to_string(),
            },
        },
        RenderErrorReason::TemplateError(e) => RenderError::Syntax {
            name: name.to_string(),
            detail: e.to_string(),
        },
        _ => RenderError::Evaluation {
            name: name.to_string(),
            detail: format!("{err}{location}"),
        },
    }
}
