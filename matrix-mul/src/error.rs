//! Error types for matrix-mul operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("matrix dimension mismatch: A is {0}x{1}, B is {2}x{3}")]
    DimensionMismatch(usize, usize, usize, usize),

    #[error("invalid worker count {0}, expected a positive integer")]
    InvalidWorkerCount(i64),

    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("worker {worker} terminated abnormally")]
    WorkerFailed { worker: usize },

    #[error("buffer of {len} elements cannot hold a {rows}x{cols} matrix")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    #[error("parse error on line {line}: {source}")]
    ParseFloat {
        line: usize,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("row on line {line} has {found} columns, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}
