//! Row-partitioned parallel matrix multiplication.
//!
//! `matrix-mul` computes C = A × B two ways: [`multiply_serial`] on the
//! calling thread, and [`multiply_parallel`] across a fixed number of
//! worker threads that fill one shared result buffer.
//!
//! # Partitioning
//!
//! Output rows are divided purely by index. With `n` rows and `w` workers,
//! each worker gets `n / w` contiguous rows and the first `n % w` workers
//! get one more. Each worker owns a disjoint slice of the result buffer,
//! so workers never contend and no locks are taken.
//!
//! # Resource Tracking
//!
//! Result buffers are recorded on a [`BufferLedger`]. The buffer is
//! released exactly once on every exit path, which the ledger lets tests
//! verify.
//!
//! # Example
//!
//! ```
//! use matrix_mul::{Matrix, multiply_parallel, multiply_serial};
//!
//! let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
//!
//! let parallel = multiply_parallel(&a, &b, 2).unwrap();
//! assert_eq!(parallel.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
//! assert_eq!(parallel, multiply_serial(&a, &b).unwrap());
//! ```

mod buffer;
mod error;
mod matrix;
mod parallel;
mod partition;
mod serial;

pub use buffer::BufferLedger;
pub use error::Error;
pub use matrix::Matrix;
pub use parallel::{ParallelExecutor, multiply_parallel};
pub use partition::{Partition, partition, worker_count};
pub use serial::multiply_serial;
