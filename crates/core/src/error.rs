//! Error types for the tbgen domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Row-level problems are
//! never errors: blank or unnamed rows are skipped during normalization.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for context building and ingestion.
#[derive(Debug, Error)]
pub enum Error {
    // --- Context ingestion ---
    #[error("Invalid testbench context: {0}")]
    InvalidContext(String),

    // --- Session / request files ---
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
