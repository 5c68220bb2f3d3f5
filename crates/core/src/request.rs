//! Caller-owned generation request.
//!
//! Replaces process-wide session state: whoever triggers a render hands the
//! current snapshot of both row collections in, and a fresh context is
//! built from it every time.

use crate::context::{TestbenchContext, build_context};
use crate::error::{Error, Result};
use crate::row::RawRow;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A snapshot of the editing surface: testbench name plus both row tables.
///
/// This is also the on-disk session format read by the CLI:
///
/// ```json
/// {
///   "name": "apb",
///   "existing_agents": [{ "agent": "apb_agent", "interface": "apb_if" }],
///   "new_agents": [{ "name": "spi", "integrate": true }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Testbench name; `null` and missing read as empty.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub existing_agents: Vec<RawRow>,

    #[serde(default)]
    pub new_agents: Vec<RawRow>,
}

impl GenerationRequest {
    /// Parse a session document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a session document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Override the testbench name, e.g. from a command-line flag.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build a fresh context from this snapshot.
    pub fn context(&self) -> TestbenchContext {
        build_context(
            self.name.as_deref().unwrap_or_default(),
            &self.existing_agents,
            &self.new_agents,
        )
    }
}
