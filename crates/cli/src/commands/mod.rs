//! Subcommand implementations and the helpers they share.

pub mod config_cmd;
pub mod context;
pub mod init;
pub mod render;
pub mod templates;

use std::path::Path;
use tbgen_config::{AppConfig, ConfigError};
use tbgen_render::{RenderError, TemplateCatalog};

/// Load the config from `--config` if given, else the default location.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => AppConfig::load_with_overrides(path),
        None => AppConfig::load(),
    }
}

/// Read the template catalog described by `config`.
pub fn load_catalog(config: &AppConfig) -> Result<TemplateCatalog, RenderError> {
    TemplateCatalog::load(&config.templates.dir, &config.templates.extension)
        .map(|catalog| catalog.with_default(config.templates.default.clone()))
}

/// Print a structured failure to stderr, as text or as a JSON report.
pub fn print_failure(err: &RenderError, json: bool) {
    let report = err.report();
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => eprintln!("{text}"),
            Err(_) => eprintln!("{}: {}", report.kind, report.message),
        }
        return;
    }

    eprintln!("error[{}]: {}", report.kind, report.message);
    if !report.detail.is_empty() {
        eprintln!("  detail: {}", report.detail);
    }
}
