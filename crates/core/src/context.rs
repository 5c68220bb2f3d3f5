//! Testbench context assembly.
//!
//! The context is what templates see. It exposes the same records twice: as
//! one flat `agents` list (existing first, then new) and grouped by kind in
//! `existing_agents` / `new_agents`. Templates may be written against either
//! shape, and strict rendering will fail loudly if either view disappears.
//!
//! # Determinism
//!
//! Assembly never sorts or deduplicates. Duplicate instance names are
//! allowed through; they are the template's problem.

use crate::agent::{AgentKind, AgentSpec, ExistingAgent, NewAgent};
use crate::builder::build_new_agent;
use crate::error::{Error, Result};
use crate::row::{RawRow, map_existing_row, normalize_row};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The normalized, immutable input to a template.
///
/// Only constructible through [`TestbenchContext::assemble`],
/// [`build_context`], or by parsing a previous export, so
/// `agents == existing_agents ++ new_agents` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContextDocument")]
pub struct TestbenchContext {
    name: String,
    agents: Vec<AgentSpec>,
    existing_agents: Vec<AgentSpec>,
    new_agents: Vec<AgentSpec>,
}

/// Wire shape of an exported context, validated before it becomes a
/// [`TestbenchContext`].
#[derive(Deserialize)]
struct ContextDocument {
    name: String,
    agents: Vec<AgentSpec>,
    existing_agents: Vec<AgentSpec>,
    new_agents: Vec<AgentSpec>,
}

impl TestbenchContext {
    /// Merge already-validated records into a context, preserving order.
    pub fn assemble(
        name: &str,
        existing: impl IntoIterator<Item = ExistingAgent>,
        new: impl IntoIterator<Item = NewAgent>,
    ) -> Self {
        let existing_agents: Vec<AgentSpec> = existing.into_iter().map(AgentSpec::from).collect();
        let new_agents: Vec<AgentSpec> = new.into_iter().map(AgentSpec::from).collect();
        let agents = existing_agents
            .iter()
            .chain(new_agents.iter())
            .cloned()
            .collect();

        Self {
            name: name.trim().to_string(),
            agents,
            existing_agents,
            new_agents,
        }
    }

    /// Testbench name, trimmed. May be empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agents(&self) -> &[AgentSpec] {
        &self.agents
    }

    pub fn existing_agents(&self) -> &[AgentSpec] {
        &self.existing_agents
    }

    pub fn new_agents(&self) -> &[AgentSpec] {
        &self.new_agents
    }

    /// Output file name for downstream consumers: `{name}_tb.{extension}`.
    pub fn output_file_name(&self, extension: &str) -> String {
        format!("{}_tb.{extension}", self.name)
    }

    /// Canonical JSON export: `name, agents, existing_agents, new_agents`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Re-ingest a previous export.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<ContextDocument> for TestbenchContext {
    type Error = Error;

    fn try_from(doc: ContextDocument) -> Result<Self> {
        let mut existing = Vec::with_capacity(doc.existing_agents.len());
        for spec in doc.existing_agents {
            match spec {
                AgentSpec::Existing(agent) => existing.push(agent),
                AgentSpec::New(agent) => {
                    return Err(Error::InvalidContext(format!(
                        "new agent '{}' listed under existing_agents",
                        agent.name
                    )));
                }
            }
        }

        let mut new = Vec::with_capacity(doc.new_agents.len());
        for spec in doc.new_agents {
            match spec {
                AgentSpec::New(agent) if agent.name.trim().is_empty() => {
                    return Err(Error::InvalidContext(
                        "new agent with a blank name".into(),
                    ));
                }
                AgentSpec::New(agent) => new.push(agent),
                AgentSpec::Existing(agent) => {
                    return Err(Error::InvalidContext(format!(
                        "existing agent '{}' listed under new_agents",
                        agent.name
                    )));
                }
            }
        }

        let context = Self::assemble(&doc.name, existing, new);
        if context.agents != doc.agents {
            return Err(Error::InvalidContext(
                "agents must equal existing_agents followed by new_agents".into(),
            ));
        }
        Ok(context)
    }
}

/// Run both row collections through normalization and assemble a context.
pub fn build_context(name: &str, existing_rows: &[RawRow], new_rows: &[RawRow]) -> TestbenchContext {
    let existing: Vec<ExistingAgent> = existing_rows
        .iter()
        .filter_map(|row| map_existing_row(normalize_row(row)))
        .collect();
    let new: Vec<NewAgent> = new_rows.iter().filter_map(build_new_agent).collect();

    debug!(
        existing = existing.len(),
        existing_skipped = existing_rows.len() - existing.len(),
        new = new.len(),
        new_skipped = new_rows.len() - new.len(),
        "Assembled testbench context"
    );

    TestbenchContext::assemble(name, existing, new)
}

/// Count of records of each kind, used for summaries.
pub fn count_by_kind(agents: &[AgentSpec], kind: AgentKind) -> usize {
    agents.iter().filter(|a| a.kind() == kind).count()
}
