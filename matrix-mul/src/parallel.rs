//! Worker-partitioned multiplication over a shared result buffer.

use std::ops::Range;
use std::sync::Arc;
use std::thread;

use tracing::{debug, debug_span, warn};

use crate::buffer::{BufferLedger, SharedBuffer};
use crate::partition::{Partition, partition};
use crate::serial::{check_dimensions, multiply_rows};
use crate::{Error, Matrix};

/// Multiplies matrices by splitting output rows across worker threads.
///
/// `ParallelExecutor` allocates one result buffer per call, splits it into
/// disjoint row regions with [`partition`], and spawns one named worker
/// per non-empty region. Workers read `A` and `B` by reference and write
/// only into their own region, so no locking is involved. The call returns
/// once every worker has been joined.
///
/// # Oversubscription
///
/// When the worker count exceeds the row count, the trailing partitions
/// are empty. Those workers are not spawned; they are logged as idle.
///
/// # Example
///
/// ```
/// use matrix_mul::{Matrix, ParallelExecutor};
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
///
/// let executor = ParallelExecutor::new(3).unwrap();
/// let c = executor.multiply(&a, &b).unwrap();
/// assert_eq!(c.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
/// ```
#[derive(Debug, Clone)]
pub struct ParallelExecutor {
    workers: usize,
    ledger: Arc<BufferLedger>,
}

impl ParallelExecutor {
    /// Creates an executor with `workers` workers, recording buffers on the
    /// global ledger.
    pub fn new(workers: usize) -> Result<Self, Error> {
        if workers == 0 {
            return Err(Error::InvalidWorkerCount(0));
        }
        Ok(Self {
            workers,
            ledger: BufferLedger::global(),
        })
    }

    /// Records result buffers on `ledger` instead of the global one.
    pub fn with_ledger(mut self, ledger: Arc<BufferLedger>) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn ledger(&self) -> &Arc<BufferLedger> {
        &self.ledger
    }

    /// Computes `a x b`.
    ///
    /// Dimensions are checked before anything is allocated. A failed spawn
    /// returns `ResourceExhausted` after the workers already started have
    /// been joined; a panicking worker returns `WorkerFailed`. The result
    /// buffer is released on every path.
    pub fn multiply(&self, a: &Matrix, b: &Matrix) -> Result<Matrix, Error> {
        self.multiply_with(a, b, multiply_rows)
    }

    /// Runs the executor with `kernel` computing each worker's rows.
    fn multiply_with<K>(&self, a: &Matrix, b: &Matrix, kernel: K) -> Result<Matrix, Error>
    where
        K: Fn(&Matrix, &Matrix, Range<usize>, &mut [f64]) + Sync,
    {
        let _span = debug_span!("multiply_parallel", workers = self.workers).entered();

        check_dimensions(a, b)?;

        let mut buffer = SharedBuffer::allocate(a.rows(), b.cols(), &self.ledger)?;
        let partitions = partition(a.rows(), self.workers)?;
        debug!(?partitions, "partitioned {} rows", a.rows());

        let regions = buffer.regions(&partitions);
        run_workers(a, b, &partitions, regions, &kernel)?;

        Ok(buffer.into_matrix())
    }
}

/// Spawns one worker per non-empty partition and joins all of them.
///
/// The first spawn failure stops further spawns; workers already running
/// are still joined before it is returned.
fn run_workers<K>(
    a: &Matrix,
    b: &Matrix,
    partitions: &[Partition],
    regions: Vec<&mut [f64]>,
    kernel: &K,
) -> Result<(), Error>
where
    K: Fn(&Matrix, &Matrix, Range<usize>, &mut [f64]) + Sync,
{
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(partitions.len());
        let mut spawn_error = None;

        for (worker, (part, region)) in partitions.iter().zip(regions).enumerate() {
            if part.is_empty() {
                debug!(worker, "idle worker, no rows assigned");
                continue;
            }

            let rows = part.range();
            let spawned = thread::Builder::new()
                .name(format!("matmul-worker-{}", worker))
                .spawn_scoped(scope, move || kernel(a, b, rows, region));

            match spawned {
                Ok(handle) => handles.push((worker, handle)),
                Err(e) => {
                    warn!(worker, error = %e, "failed to spawn worker");
                    spawn_error = Some(Error::ResourceExhausted(format!(
                        "spawning worker {}: {}",
                        worker, e
                    )));
                    break;
                }
            }
        }

        let mut failed = None;
        for (worker, handle) in handles {
            match handle.join() {
                Ok(()) => debug!(worker, "worker finished"),
                Err(_) => {
                    warn!(worker, "worker panicked");
                    failed.get_or_insert(worker);
                }
            }
        }

        match (spawn_error, failed) {
            (Some(e), _) => Err(e),
            (None, Some(worker)) => Err(Error::WorkerFailed { worker }),
            (None, None) => Ok(()),
        }
    })
}

/// Computes `a x b` with `worker_count` workers.
///
/// Shorthand for [`ParallelExecutor::new`] followed by
/// [`ParallelExecutor::multiply`].
pub fn multiply_parallel(a: &Matrix, b: &Matrix, worker_count: usize) -> Result<Matrix, Error> {
    ParallelExecutor::new(worker_count)?.multiply(a, b)
}
