//! Error types for the maxtree crates

use thiserror::Error;

/// Main error type for maxtree operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid grid dimensions: shape {shape:?} holds {expected} pixels, got {actual}")]
    InvalidDimensions {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Index out of bounds: {index} in a grid of {len} pixels")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Length mismatch: {name} has {actual} elements, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Neighbor offset {offset} leaves a grid of {len} pixels")]
    OffsetOutOfRange { offset: i64, len: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for maxtree operations
pub type Result<T> = std::result::Result<T, Error>;
