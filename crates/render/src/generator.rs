//! End-to-end generation: request snapshot in, named output file out.

use crate::renderer::TemplateRenderer;
use crate::{RenderError, RenderResult};
use std::path::{Path, PathBuf};
use tbgen_core::{GenerationRequest, TestbenchContext};
use tracing::info;

/// A successfully rendered testbench, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// `{name}_tb.{extension}`
    pub file_name: String,
    /// Template the text was rendered from.
    pub template: String,
    pub contents: String,
}

impl GeneratedFile {
    /// Write into `dir`, returning the full path. The file never lands
    /// outside `dir`.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        if !is_plain_file_name(&self.file_name) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("refusing to write '{}' outside {}", self.file_name, dir.display()),
            ));
        }
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}

/// A single path component with no separators.
fn is_plain_file_name(name: &str) -> bool {
    !name.contains(['/', '\\'])
        && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
}

/// Runs the whole pipeline for one request.
#[derive(Debug, Clone)]
pub struct Generator {
    renderer: TemplateRenderer,
    output_extension: String,
}

impl Generator {
    pub fn new(renderer: TemplateRenderer, output_extension: impl Into<String>) -> Self {
        Self {
            renderer,
            output_extension: output_extension.into(),
        }
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    /// Build a fresh context from `request` and render it.
    pub fn generate_request(
        &self,
        template: Option<&str>,
        request: &GenerationRequest,
    ) -> RenderResult<GeneratedFile> {
        self.generate(template, &request.context())
    }

    /// Render `context` with `template`, or the catalog default when `None`.
    ///
    /// An empty catalog is reported before anything else, then a blank
    /// testbench name, then template lookup and evaluation failures.
    pub fn generate(
        &self,
        template: Option<&str>,
        context: &TestbenchContext,
    ) -> RenderResult<GeneratedFile> {
        let catalog = self.renderer.catalog();
        if catalog.is_empty() {
            return Err(RenderError::EmptyCatalog {
                dir: catalog.dir().to_path_buf(),
            });
        }
        if context.name().is_empty() {
            return Err(RenderError::MissingName);
        }
        if !is_plain_file_name(&context.output_file_name(&self.output_extension)) {
            return Err(RenderError::InvalidName {
                name: context.name().to_string(),
            });
        }

        let template = match template {
            Some(name) => name,
            None => catalog
                .default_template()
                .ok_or_else(|| RenderError::EmptyCatalog {
                    dir: catalog.dir().to_path_buf(),
                })?,
        };

        let contents = self.renderer.render(template, context)?;
        let file_name = context.output_file_name(&self.output_extension);
        info!(template = %template, output = %file_name, "Generated testbench");

        Ok(GeneratedFile {
            file_name,
            template: template.to_string(),
            contents,
        })
    }
}
