//! Strict template rendering for tbgen.
//!
//! Templates are Handlebars files discovered once from a directory and
//! rendered in strict mode: any reference the context cannot satisfy, at
//! any depth, aborts the render instead of producing a blank.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌─────────────┐
//! │ TestbenchContext │───▶│ TemplateRenderer │───▶│ text        │
//! └──────────────────┘    └────────┬─────────┘    │   or        │
//!                                  │              │ RenderError │
//!                         ┌────────┴────────┐     └─────────────┘
//!                         │ TemplateCatalog │
//!                         └─────────────────┘
//! ```
//!
//! # Example Template
//!
//! ```handlebars
//! class {{name}}_env extends uvm_env;
//! {{#each agents}}
//!   {{this.name}} {{this.instance_name}};
//! {{/each}}
//! endclass
//! ```

mod catalog;
mod generator;
mod helpers;
mod renderer;

pub use catalog::TemplateCatalog;
pub use generator::{GeneratedFile, Generator};
pub use renderer::TemplateRenderer;

use serde::Serialize;
use std::path::PathBuf;

/// Re-export for convenience.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Errors from catalog lookup and template evaluation.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no templates found in {dir}")]
    EmptyCatalog { dir: PathBuf },

    #[error("template '{name}' not found in catalog")]
    TemplateNotFound { name: String, available: Vec<String> },

    #[error("failed to read template catalog at {dir}: {reason}")]
    CatalogIo { dir: PathBuf, reason: String },

    #[error("template '{name}' has a syntax error")]
    Syntax { name: String, detail: String },

    #[error("template '{name}' referenced an undefined value")]
    Undefined { name: String, detail: String },

    #[error("template '{name}' failed to render")]
    Evaluation { name: String, detail: String },

    #[error("testbench name is empty; enter a name to render")]
    MissingName,

    #[error("testbench name '{name}' cannot be used as a file name")]
    InvalidName { name: String },
}

/// Coarse classification of a [`RenderError`] for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The template could not be resolved from the catalog.
    LookupFailure,
    /// The template was found but could not be compiled or evaluated.
    RenderFailure,
    /// The request itself is not renderable.
    InvalidRequest,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::LookupFailure => "lookup_failure",
            ErrorKind::RenderFailure => "render_failure",
            ErrorKind::InvalidRequest => "invalid_request",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured failure: kind, human-readable message, raw diagnostic.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    pub detail: String,
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::EmptyCatalog { .. }
            | RenderError::TemplateNotFound { .. }
            | RenderError::CatalogIo { .. } => ErrorKind::LookupFailure,
            RenderError::Syntax { .. }
            | RenderError::Undefined { .. }
            | RenderError::Evaluation { .. } => ErrorKind::RenderFailure,
            RenderError::MissingName | RenderError::InvalidName { .. } => {
                ErrorKind::InvalidRequest
            }
        }
    }

    /// Diagnostic detail: the offending reference, syntax location, or the
    /// templates that do exist.
    pub fn detail(&self) -> String {
        match self {
            RenderError::EmptyCatalog { dir } => format!(
                "create {} and put at least one template there",
                dir.display()
            ),
            RenderError::TemplateNotFound { available, .. } => {
                format!("available templates: {}", available.join(", "))
            }
            RenderError::CatalogIo { reason, .. } => reason.clone(),
            RenderError::Syntax { detail, .. }
            | RenderError::Undefined { detail, .. }
            | RenderError::Evaluation { detail, .. } => detail.clone(),
            RenderError::MissingName => String::new(),
            RenderError::InvalidName { .. } => "path separators are not allowed".to_string(),
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
            detail: self.detail(),
        }
    }
}
