//! # tbgen Core
//!
//! Domain types and the context-building half of the tbgen pipeline:
//!
//! ```text
//! raw rows ──▶ normalize_row ──▶ map_existing_row ─┐
//!                                                   ├─▶ TestbenchContext
//! raw rows ──▶ build_new_agent ────────────────────┘
//! ```
//!
//! Nothing here touches templates or the filesystem layout; rendering lives
//! in `tbgen-render`.

pub mod agent;
pub mod builder;
pub mod context;
pub mod error;
pub mod request;
pub mod row;

// Re-export key types at crate root for ergonomics
pub use agent::{AgentKind, AgentSpec, ExistingAgent, NewAgent};
pub use builder::build_new_agent;
pub use context::{TestbenchContext, build_context};
pub use error::{Error, Result};
pub use request::GenerationRequest;
pub use row::{NormalizedRow, RawRow, map_existing_row, normalize_row};
