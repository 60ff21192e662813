//! Shared result buffers and the ledger that tracks their release.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::trace;

use crate::partition::Partition;
use crate::{Error, Matrix};

/// Tracks acquisition and release of shared result buffers.
///
/// Every buffer handed to workers is acquired once and must be released
/// exactly once. A ledger whose counts disagree has seen either a leak
/// (`outstanding() > 0`) or a double release (`over_released() > 0`).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use matrix_mul::{BufferLedger, Matrix, ParallelExecutor};
///
/// let ledger = Arc::new(BufferLedger::new());
/// let executor = ParallelExecutor::new(2).unwrap().with_ledger(Arc::clone(&ledger));
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
/// executor.multiply(&a, &b).unwrap();
///
/// assert_eq!(ledger.acquired(), 1);
/// assert!(ledger.is_balanced());
/// ```
#[derive(Debug, Default)]
pub struct BufferLedger {
    acquired: AtomicUsize,
    released: AtomicUsize,
    over_released: AtomicUsize,
}

impl BufferLedger {
    pub const fn new() -> Self {
        Self {
            acquired: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
            over_released: AtomicUsize::new(0),
        }
    }

    /// Process-wide ledger used by [`multiply_parallel`](crate::multiply_parallel).
    pub fn global() -> Arc<BufferLedger> {
        static GLOBAL: OnceLock<Arc<BufferLedger>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(BufferLedger::new())))
    }

    /// Records that a buffer was acquired.
    pub fn acquire(&self) {
        self.acquired.fetch_add(1, Ordering::SeqCst);
    }

    /// Records that a buffer was released.
    ///
    /// A release with nothing outstanding is counted as an over-release.
    pub fn release(&self) {
        let released = self
            .released
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |released| {
                (released < self.acquired.load(Ordering::SeqCst)).then_some(released + 1)
            });
        if released.is_err() {
            self.over_released.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn over_released(&self) -> usize {
        self.over_released.load(Ordering::SeqCst)
    }

    /// Buffers acquired but not yet released.
    pub fn outstanding(&self) -> usize {
        self.acquired().saturating_sub(self.released())
    }

    /// Returns `true` if every acquired buffer was released exactly once.
    pub fn is_balanced(&self) -> bool {
        self.outstanding() == 0 && self.over_released() == 0
    }
}

/// Releases its buffer on the ledger when dropped.
struct Lease {
    ledger: Arc<BufferLedger>,
}

impl Lease {
    fn acquire(ledger: &Arc<BufferLedger>) -> Self {
        ledger.acquire();
        trace!(outstanding = ledger.outstanding(), "result buffer acquired");
        Self {
            ledger: Arc::clone(ledger),
        }
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.ledger.release();
        trace!(outstanding = self.ledger.outstanding(), "result buffer released");
    }
}

/// Allocates a zeroed row-major `rows x cols` buffer.
///
/// An oversized or unsatisfiable request is `ResourceExhausted` rather
/// than a panic or abort.
pub(crate) fn zeroed(rows: usize, cols: usize) -> Result<Vec<f64>, Error> {
    let len = rows.checked_mul(cols).ok_or_else(|| {
        Error::ResourceExhausted(format!("{}x{} buffer overflows usize", rows, cols))
    })?;

    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|e| {
        Error::ResourceExhausted(format!("buffer of {} elements: {}", len, e))
    })?;
    data.resize(len, 0.0);
    Ok(data)
}

/// The result buffer all workers of one multiplication write into.
pub(crate) struct SharedBuffer {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    _lease: Lease,
}

impl SharedBuffer {
    /// Allocates a zeroed `rows x cols` buffer and records it on `ledger`.
    pub(crate) fn allocate(
        rows: usize,
        cols: usize,
        ledger: &Arc<BufferLedger>,
    ) -> Result<Self, Error> {
        let data = zeroed(rows, cols)?;

        Ok(Self {
            rows,
            cols,
            data,
            _lease: Lease::acquire(ledger),
        })
    }

    /// Splits the buffer into one mutable region per partition.
    ///
    /// Partitions must be contiguous and in row order, as produced by
    /// [`partition`](crate::partition).
    pub(crate) fn regions(&mut self, partitions: &[Partition]) -> Vec<&mut [f64]> {
        let cols = self.cols;
        let mut rest = self.data.as_mut_slice();
        partitions
            .iter()
            .map(|p| {
                let (head, tail) = std::mem::take(&mut rest).split_at_mut(p.count * cols);
                rest = tail;
                head
            })
            .collect()
    }

    /// Hands the filled buffer back as an owned matrix, releasing the lease.
    pub(crate) fn into_matrix(self) -> Matrix {
        let Self {
            rows, cols, data, ..
        } = self;
        Matrix::from_parts(rows, cols, data)
    }
}
