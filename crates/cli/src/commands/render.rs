//! `tbgen render` — Render a template into `{name}_tb.<ext>`.

use std::path::{Path, PathBuf};
use tbgen_core::{GenerationRequest, TestbenchContext};
use tbgen_render::{Generator, TemplateRenderer};
use tracing::debug;

/// Where the context comes from.
pub enum Source {
    /// A session file of raw rows, with an optional name override.
    Session { path: PathBuf, name: Option<String> },
    /// A context exported earlier by `tbgen context`.
    Export(PathBuf),
}

impl Source {
    pub fn from_args(
        input: Option<PathBuf>,
        context: Option<PathBuf>,
        name: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        match (input, context) {
            (Some(path), None) => Ok(Source::Session { path, name }),
            (None, Some(path)) => Ok(Source::Export(path)),
            _ => Err("exactly one of --input or --context is required".into()),
        }
    }

    fn context(&self) -> Result<TestbenchContext, Box<dyn std::error::Error>> {
        match self {
            Source::Session { path, name } => {
                let mut request = GenerationRequest::load(path)?;
                if let Some(name) = name {
                    request = request.with_name(name.clone());
                }
                Ok(request.context())
            }
            Source::Export(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
                Ok(TestbenchContext::from_json(&json)?)
            }
        }
    }
}

pub fn run(
    config_path: Option<&Path>,
    source: Source,
    template: Option<&str>,
    out_dir: Option<&Path>,
    json_errors: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let context = source.context()?;

    let catalog = match super::load_catalog(&config) {
        Ok(catalog) => catalog,
        Err(e) => {
            super::print_failure(&e, json_errors);
            std::process::exit(1);
        }
    };
    debug!(
        templates = catalog.len(),
        requested = template.unwrap_or("<default>"),
        agents = context.agents().len(),
        "Rendering testbench"
    );
    let generator = Generator::new(TemplateRenderer::new(catalog), &config.output.extension);

    match generator.generate(template, &context) {
        Ok(file) => match out_dir {
            Some(dir) => {
                let path = file.write_to(dir)?;
                println!("Wrote {} (template: {})", path.display(), file.template);
            }
            None => print!("{}", file.contents),
        },
        Err(e) => {
            // Nothing is written on failure; a previous output file stays as it was.
            super::print_failure(&e, json_errors);
            std::process::exit(1);
        }
    }

    Ok(())
}
