//! Agent records carried through the generation pipeline.
//!
//! Records are only produced by [`crate::row::map_existing_row`] and
//! [`crate::builder::build_new_agent`], so every downstream stage can match
//! on [`AgentSpec`] instead of probing loosely-typed rows for keys.

use serde::{Deserialize, Serialize};

/// Default `name` of an existing agent whose `agent` column is blank.
pub const DEFAULT_AGENT_NAME: &str = "agent";

/// Default `instance_name` of an existing agent whose instance column is blank.
pub const DEFAULT_INSTANCE_NAME: &str = "agent_i";

/// Suffix appended to a lowercased new-agent name to derive its instance.
pub const INSTANCE_SUFFIX: &str = "_i";

/// One agent of the testbench, tagged by where it comes from.
///
/// Serialized with a `kind` tag (`"existing"` / `"new"`) followed by the
/// record's fields in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentSpec {
    /// An agent that already exists in the verification environment.
    Existing(ExistingAgent),
    /// An agent to be introduced by the generated code.
    New(NewAgent),
}

/// Which group an [`AgentSpec`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Existing,
    New,
}

impl AgentSpec {
    pub fn kind(&self) -> AgentKind {
        match self {
            AgentSpec::Existing(_) => AgentKind::Existing,
            AgentSpec::New(_) => AgentKind::New,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AgentSpec::Existing(a) => &a.name,
            AgentSpec::New(a) => &a.name,
        }
    }

    pub fn instance_name(&self) -> &str {
        match self {
            AgentSpec::Existing(a) => &a.instance_name,
            AgentSpec::New(a) => &a.instance_name,
        }
    }
}

/// An existing agent. Only `name` and `instance_name` are defaulted; the
/// component fields stay empty when unset and are left to the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingAgent {
    pub(crate) name: String,
    pub(crate) instance_name: String,
    pub(crate) interface: String,
    pub(crate) driver: String,
    pub(crate) monitor: String,
    pub(crate) sequencer: String,
    pub(crate) sequence: String,
}

impl ExistingAgent {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    pub fn monitor(&self) -> &str {
        &self.monitor
    }

    pub fn sequencer(&self) -> &str {
        &self.sequencer
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }
}

/// A new agent. `name` is never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAgent {
    pub(crate) name: String,
    pub(crate) instance_name: String,
    pub(crate) integrate: bool,
}

impl NewAgent {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    /// Whether the generated testbench should instantiate this agent.
    pub fn integrate(&self) -> bool {
        self.integrate
    }
}

impl From<ExistingAgent> for AgentSpec {
    fn from(agent: ExistingAgent) -> Self {
        AgentSpec::Existing(agent)
    }
}

impl From<NewAgent> for AgentSpec {
    fn from(agent: NewAgent) -> Self {
        AgentSpec::New(agent)
    }
}
