//! Error types. Absence (`find`, `remove`, `pop_*`) is an `Option`, never an error.

use thiserror::Error;

/// Malformed line-oriented store input.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("owner '{owner}' on line {line} has no sales line")]
    MissingSales { line: usize, owner: String },
    #[error("invalid sales value '{text}' on line {line}")]
    InvalidSales {
        line: usize,
        text: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("failed to read store input")]
    Io(#[from] std::io::Error),
}

/// Rejected table growth policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("initial capacity must be at least 1")]
    ZeroCapacity,
    #[error("max load factor must be finite and > 0, got {0}")]
    InvalidLoadFactor(f64),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(u32),
}

/// Push into a full fixed-capacity queue.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("queue is full (capacity {capacity})")]
pub struct CapacityError {
    pub capacity: usize,
}
