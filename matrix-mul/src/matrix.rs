//! Dense row-major matrices and their whitespace-delimited text form.

use std::fmt;
use std::str::FromStr;

use crate::Error;
use crate::buffer::zeroed;

/// A dense, row-major matrix of `f64` values.
///
/// The backing buffer always holds exactly `rows * cols` elements.
///
/// # Text Format
///
/// `Matrix` parses from whitespace-delimited numbers, one row per line,
/// and displays with two decimals per element:
///
/// ```
/// use matrix_mul::Matrix;
///
/// let m: Matrix = "1 2\n3 4\n".parse().unwrap();
/// assert_eq!(m.shape(), (2, 2));
/// assert_eq!(m.to_string(), "1.00 2.00\n3.00 4.00\n");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Wraps a row-major buffer, checking that it holds `rows * cols` values.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, Error> {
        match rows.checked_mul(cols) {
            Some(len) if len == data.len() => Ok(Self { rows, cols, data }),
            _ => Err(Error::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            }),
        }
    }

    /// Builds a matrix from per-row vectors.
    ///
    /// Every row must have the length of the first one.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        let cols = rows.first().map_or(0, |row| row.len());
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::RaggedRow {
                    line: i + 1,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// A `rows x cols` matrix of zeros.
    ///
    /// Fails with `ResourceExhausted` when the buffer cannot be allocated.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, Error> {
        Ok(Self {
            rows,
            cols,
            data: zeroed(rows, cols)?,
        })
    }

    /// Buffer produced by the multipliers, already sized `rows * cols`.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= self.rows()`.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn get(&self, r: usize, c: usize) -> Option<f64> {
        if r < self.rows && c < self.cols {
            Some(self.data[r * self.cols + c])
        } else {
            None
        }
    }

    /// Copies the matrix out as per-row vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }
}

impl FromStr for Matrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut data = Vec::new();
        let mut rows = 0;
        let mut cols = None;

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|source| Error::ParseFloat {
                        line: line_no,
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let expected = *cols.get_or_insert(row.len());
            if row.len() != expected {
                return Err(Error::RaggedRow {
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }

            data.extend(row);
            rows += 1;
        }

        Ok(Self {
            rows,
            cols: cols.unwrap_or(0),
            data,
        })
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for (c, value) in self.row(r).iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:.2}", value)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
