//! Error types for cityscan.
//!
//! Range queries themselves can only fail when memory for a tree node or a
//! result sequence cannot be reserved. The remaining variants belong to the
//! loading and configuration layers around the query core.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Growing a tree arena, traversal stack or result sequence failed.
    #[error("Allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A line of a city file could not be parsed. `line` is 1-based.
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
