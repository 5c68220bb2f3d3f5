//! Template discovery.
//!
//! The catalog is read once per process. Every regular file in the
//! configured directory whose name ends in `.{extension}` is a template,
//! addressed by its file name. The catalog never changes after loading.

use crate::{RenderError, RenderResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An immutable, name-sorted set of template sources.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    dir: PathBuf,
    templates: BTreeMap<String, String>,
    preferred: Option<String>,
}

impl TemplateCatalog {
    /// Scan `dir` for templates with the given extension.
    ///
    /// A missing directory yields an empty catalog; an unreadable one is an
    /// error.
    pub fn load(dir: &Path, extension: &str) -> RenderResult<Self> {
        let mut templates = BTreeMap::new();

        if !dir.is_dir() {
            debug!("Template directory {} does not exist", dir.display());
            return Ok(Self {
                dir: dir.to_path_buf(),
                templates,
                preferred: None,
            });
        }

        let io_err = |e: std::io::Error| RenderError::CatalogIo {
            dir: dir.to_path_buf(),
            reason: e.to_string(),
        };
        let suffix = format!(".{extension}");

        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(&suffix) {
                continue;
            }
            let source = std::fs::read_to_string(&path).map_err(io_err)?;
            debug!(template = %file_name, bytes = source.len(), "Loaded template");
            templates.insert(file_name.to_string(), source);
        }

        info!("Loaded {} template(s) from {}", templates.len(), dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
            templates,
            preferred: None,
        })
    }

    /// Build a catalog from in-memory sources.
    pub fn from_sources<N, S>(sources: impl IntoIterator<Item = (N, S)>) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        Self {
            dir: PathBuf::from("<memory>"),
            templates: sources
                .into_iter()
                .map(|(n, s)| (n.into(), s.into()))
                .collect(),
            preferred: None,
        }
    }

    /// Prefer `name` as the default selection when it is present.
    pub fn with_default(mut self, name: impl Into<String>) -> Self {
        self.preferred = Some(name.into());
        self
    }

    /// Directory the catalog was read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Template names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The preferred template if it exists, otherwise the first by name.
    pub fn default_template(&self) -> Option<&str> {
        self.preferred
            .as_deref()
            .filter(|name| self.templates.contains_key(*name))
            .or_else(|| self.names().next())
    }

    /// Look up a template source by name.
    pub fn get(&self, name: &str) -> RenderResult<&str> {
        if self.templates.is_empty() {
            return Err(RenderError::EmptyCatalog {
                dir: self.dir.clone(),
            });
        }
        self.templates
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| RenderError::TemplateNotFound {
                name: name.to_string(),
                available: self.templates.keys().cloned().collect(),
            })
    }
}
