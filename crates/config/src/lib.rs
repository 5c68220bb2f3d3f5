//! Configuration loading, validation, and management for tbgen.
//!
//! Loads configuration from `~/.tbgen/config.toml` (or an explicit path)
//! with environment variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.tbgen/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Template catalog settings
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Generated output settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory scanned for templates. Relative paths resolve against the
    /// working directory.
    #[serde(default = "default_template_dir")]
    pub dir: PathBuf,

    /// File extension (without the dot) that marks a file as a template.
    #[serde(default = "default_template_extension")]
    pub extension: String,

    /// Template selected when none is named on the command line.
    #[serde(default = "default_template_name")]
    pub default: String,
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("templates")
}
fn default_template_extension() -> String {
    "hbs".into()
}
fn default_template_name() -> String {
    "tb.sv.hbs".into()
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_template_dir(),
            extension: default_template_extension(),
            default: default_template_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Extension of rendered files: `{name}_tb.{extension}`.
    #[serde(default = "default_output_extension")]
    pub extension: String,

    /// File name used when exporting the context JSON into a directory.
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_output_extension() -> String {
    "sv".into()
}
fn default_export_file_name() -> String {
    "tb_inputs.json".into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: default_output_extension(),
            export_file_name: default_export_file_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.tbgen/config.toml).
    ///
    /// Environment overrides, applied after the file:
    /// - `TBGEN_TEMPLATE_DIR`
    /// - `TBGEN_TEMPLATE`
    /// - `TBGEN_OUTPUT_EXT`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_overrides(&Self::config_path())
    }

    /// Load from `path`, then apply environment overrides and re-validate.
    pub fn load_with_overrides(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var("TBGEN_TEMPLATE_DIR") {
            self.templates.dir = PathBuf::from(dir);
        }
        if let Some(name) = var("TBGEN_TEMPLATE") {
            self.templates.default = name;
        }
        if let Some(ext) = var("TBGEN_OUTPUT_EXT") {
            self.output.extension = ext;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".tbgen")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        check_extension("templates.extension", &self.templates.extension)?;
        check_extension("output.extension", &self.output.extension)?;

        if self.templates.default.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "templates.default must not be empty".into(),
            ));
        }

        if self.output.export_file_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.export_file_name must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn check_extension(field: &str, ext: &str) -> Result<(), ConfigError> {
    if ext.is_empty() {
        return Err(ConfigError::ValidationError(format!("{field} must not be empty")));
    }
    if ext.starts_with('.') {
        return Err(ConfigError::ValidationError(format!(
            "{field} must not start with '.' (got \"{ext}\")"
        )));
    }
    Ok(())
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
