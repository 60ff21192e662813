//! Row partitioning across workers.

use std::ops::Range;

use crate::Error;

/// A contiguous half-open range of output rows owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub begin: usize,
    pub count: usize,
}

impl Partition {
    pub fn end(&self) -> usize {
        self.begin + self.count
    }

    pub fn range(&self) -> Range<usize> {
        self.begin..self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Splits `total_rows` into `worker_count` contiguous partitions.
///
/// Worker `w` gets `total_rows / worker_count` rows, plus one extra row
/// when `w < total_rows % worker_count`. Partitions come back in worker
/// order and cover `[0, total_rows)` without gaps or overlap. When there
/// are more workers than rows, the trailing partitions are empty.
///
/// # Example
///
/// ```
/// use matrix_mul::{partition, Partition};
///
/// let parts = partition(7, 3).unwrap();
/// assert_eq!(
///     parts,
///     vec![
///         Partition { begin: 0, count: 3 },
///         Partition { begin: 3, count: 2 },
///         Partition { begin: 5, count: 2 },
///     ]
/// );
/// ```
pub fn partition(total_rows: usize, worker_count: usize) -> Result<Vec<Partition>, Error> {
    if worker_count == 0 {
        return Err(Error::InvalidWorkerCount(0));
    }

    let base = total_rows / worker_count;
    let remainder = total_rows % worker_count;

    Ok((0..worker_count)
        .map(|w| Partition {
            begin: w * base + w.min(remainder),
            count: base + usize::from(w < remainder),
        })
        .collect())
}

/// Validates a user-supplied worker count.
pub fn worker_count(raw: i64) -> Result<usize, Error> {
    match usize::try_from(raw) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidWorkerCount(raw)),
    }
}
