//! Error types for weighted_merkle

use thiserror::Error;

/// Result type alias for weighted_merkle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, proving or verifying a tree
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid entry weight: {0} is not a power-of-two fraction between 1/1024 and 1")]
    InvalidWeight(f64),

    #[error("Invalid depth {0}: leaves sit at depth 0 to 10")]
    InvalidDepth(u32),

    #[error("Invalid interval: position {position} at depth {depth}")]
    InvalidInterval { position: u64, depth: u32 },

    #[error("Entry weights sum to {total_units}/1024, exceeding 1")]
    WeightOverflow { total_units: u64 },

    #[error("Empty entry list is not allowed to build a tree")]
    EmptyEntryList,

    #[error("The entry requested for proof is not a leaf of this tree")]
    UnknownEntry,

    #[error("Invalid merkle proof: {0}")]
    InvalidProof(String),

    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Config error: {0}")]
    Config(String),
}
