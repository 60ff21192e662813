//! Benchmark driver comparing serial and worker-partitioned multiplication.
//!
//! The driver loads two whitespace-delimited matrix files, times
//! [`matrix_mul::multiply_serial`] against [`matrix_mul::multiply_parallel`],
//! checks that both produce the same matrix, and writes the product back
//! out with two decimals per element.

pub mod bench;
pub mod cli;
pub mod error;
pub mod files;
pub mod generate;
pub mod prompt;

pub use error::Error;
