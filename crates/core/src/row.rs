//! Raw row ingestion for existing agents.
//!
//! Rows arrive as loosely-typed JSON objects from whatever editing surface
//! produced them. Nothing upstream is trusted: every recognized key is read
//! defensively, trimmed, and anything that is not a string becomes `""`.

use crate::agent::{DEFAULT_AGENT_NAME, DEFAULT_INSTANCE_NAME, ExistingAgent};
use serde_json::Value;

/// A raw, unvalidated row: string keys mapped to arbitrary JSON values.
pub type RawRow = serde_json::Map<String, Value>;

/// An existing-agent row with every recognized key present and trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    pub instance_name: String,
    pub agent: String,
    pub interface: String,
    pub driver: String,
    pub monitor: String,
    pub sequencer: String,
    pub sequence: String,
}

impl NormalizedRow {
    /// True when every column, instance name included, is empty.
    pub fn is_blank(&self) -> bool {
        [
            &self.instance_name,
            &self.agent,
            &self.interface,
            &self.driver,
            &self.monitor,
            &self.sequencer,
            &self.sequence,
        ]
        .iter()
        .all(|v| v.is_empty())
    }
}

/// Read `key` from a raw row as trimmed text.
///
/// Missing keys, `null`, and non-string values all read as `""`.
pub fn text_field(row: &RawRow, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// Coerce one raw existing-agent row into a [`NormalizedRow`]. Never fails.
pub fn normalize_row(row: &RawRow) -> NormalizedRow {
    NormalizedRow {
        instance_name: text_field(row, "instance_name"),
        agent: text_field(row, "agent"),
        interface: text_field(row, "interface"),
        driver: text_field(row, "driver"),
        monitor: text_field(row, "monitor"),
        sequencer: text_field(row, "sequencer"),
        sequence: text_field(row, "sequence"),
    }
}

/// Turn a normalized row into an existing agent, or `None` for a blank
/// placeholder row.
pub fn map_existing_row(row: NormalizedRow) -> Option<ExistingAgent> {
    if row.is_blank() {
        return None;
    }

    let name = if row.agent.is_empty() {
        DEFAULT_AGENT_NAME.to_string()
    } else {
        row.agent
    };
    let instance_name = if row.instance_name.is_empty() {
        DEFAULT_INSTANCE_NAME.to_string()
    } else {
        row.instance_name
    };

    Some(ExistingAgent {
        name,
        instance_name,
        interface: row.interface,
        driver: row.driver,
        monitor: row.monitor,
        sequencer: row.sequencer,
        sequence: row.sequence,
    })
}
