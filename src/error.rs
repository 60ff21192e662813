//! Error types for the benchmark driver.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Matrix(#[from] matrix_mul::Error),

    #[error("{}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: matrix_mul::Error,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("console error: {0}")]
    Console(#[from] std::io::Error),

    #[error("invalid worker count input {0:?}")]
    InvalidInput(String),

    #[error("parallel result differs from serial result at C[{row}][{col}]")]
    Divergence { row: usize, col: usize },

    #[error("result buffers not released exactly once: {outstanding} outstanding, {over_released} over-released")]
    BufferLeak {
        outstanding: usize,
        over_released: usize,
    },

    #[error("multiplication task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
