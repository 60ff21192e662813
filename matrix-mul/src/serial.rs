//! Single-threaded reference multiplication and the shared row kernel.

use std::ops::Range;

use crate::buffer::zeroed;
use crate::{Error, Matrix};

/// Multiplies `a` by `b` on the calling thread.
///
/// Fails with `DimensionMismatch` before allocating, and with
/// `ResourceExhausted` when the result cannot be allocated.
///
/// This is the baseline the parallel executor is timed and checked
/// against; both use [`multiply_rows`], so their results are bit-for-bit
/// identical.
///
/// # Example
///
/// ```
/// use matrix_mul::{Matrix, multiply_serial};
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
///
/// let c = multiply_serial(&a, &b).unwrap();
/// assert_eq!(c.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
/// ```
pub fn multiply_serial(a: &Matrix, b: &Matrix) -> Result<Matrix, Error> {
    check_dimensions(a, b)?;

    let mut data = zeroed(a.rows(), b.cols())?;
    multiply_rows(a, b, 0..a.rows(), &mut data);

    Ok(Matrix::from_parts(a.rows(), b.cols(), data))
}

/// Fails with `DimensionMismatch` unless `a.cols() == b.rows()`.
pub(crate) fn check_dimensions(a: &Matrix, b: &Matrix) -> Result<(), Error> {
    if a.cols() != b.rows() {
        return Err(Error::DimensionMismatch(
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols(),
        ));
    }
    Ok(())
}

/// Computes output rows `rows` of `a x b` into `out`.
///
/// `out` holds exactly `rows.len() * b.cols()` values, row-major, starting
/// at `rows.start`. Each cell is accumulated over `i = 0..a.cols()` in
/// ascending order.
pub(crate) fn multiply_rows(a: &Matrix, b: &Matrix, rows: Range<usize>, out: &mut [f64]) {
    let cols = b.cols();
    let b_data = b.as_slice();
    debug_assert_eq!(out.len(), rows.len() * cols);

    for (offset, r) in rows.enumerate() {
        let a_row = a.row(r);
        let out_row = &mut out[offset * cols..(offset + 1) * cols];

        for (c, cell) in out_row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (i, &x) in a_row.iter().enumerate() {
                sum += x * b_data[i * cols + c];
            }
            *cell = sum;
        }
    }
}
