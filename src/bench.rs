//! Timed serial vs parallel comparison.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use matrix_mul::{BufferLedger, Matrix, ParallelExecutor, multiply_serial};
use tracing::info;

use crate::cli::RunArgs;
use crate::{Error, files, prompt};

/// Outcome of one benchmark run.
#[derive(Debug)]
pub struct Report {
    pub workers: usize,
    pub serial: Duration,
    pub parallel: Duration,
    pub result: Matrix,
}

impl Report {
    /// Serial time divided by parallel time.
    ///
    /// `None` when the parallel run finished below the clock's resolution.
    pub fn speedup(&self) -> Option<f64> {
        if self.parallel.is_zero() {
            return None;
        }
        Some(self.serial.as_secs_f64() / self.parallel.as_secs_f64())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sequential time: {:.10} seconds", self.serial.as_secs_f64())?;
        writeln!(
            f,
            "Parallel time ({} workers): {:.10} seconds",
            self.workers,
            self.parallel.as_secs_f64()
        )?;
        match self.speedup() {
            Some(speedup) => write!(f, "Speedup: {:.6}X", speedup),
            None => write!(f, "Speedup: n/a (parallel time below clock resolution)"),
        }
    }
}

/// Loads both inputs, multiplies them both ways and writes the product.
///
/// The worker count comes from `args.workers`, or from the console prompt
/// when it is not set.
pub async fn run(args: RunArgs) -> Result<Report, Error> {
    let a = files::read_matrix(&args.a).await?;
    let b = files::read_matrix(&args.b).await?;
    info!(a = ?a.shape(), b = ?b.shape(), "loaded inputs");

    if a.cols() != b.rows() {
        let mismatch = matrix_mul::Error::DimensionMismatch(a.rows(), a.cols(), b.rows(), b.cols());
        return Err(mismatch.into());
    }

    let workers = match args.workers {
        Some(raw) => matrix_mul::worker_count(raw)?,
        None => prompt::ask_worker_count().await?,
    };

    let report = compare(a, b, workers).await?;
    files::write_matrix(&args.out, &report.result).await?;
    info!(path = %args.out.display(), "wrote result");

    Ok(report)
}

/// Times serial and parallel multiplication of `a` by `b` and checks that
/// they agree exactly.
pub async fn compare(a: Matrix, b: Matrix, workers: usize) -> Result<Report, Error> {
    tokio::task::spawn_blocking(move || -> Result<Report, Error> {
        let start = Instant::now();
        let serial_result = multiply_serial(&a, &b)?;
        let serial = start.elapsed();
        info!(?serial, "serial multiplication done");

        let ledger = Arc::new(BufferLedger::new());
        let executor = ParallelExecutor::new(workers)?.with_ledger(ledger);

        let start = Instant::now();
        let result = executor.multiply(&a, &b)?;
        let parallel = start.elapsed();
        info!(?parallel, workers = executor.workers(), "parallel multiplication done");

        check_released(executor.ledger())?;
        verify(&serial_result, &result)?;

        Ok(Report {
            workers: executor.workers(),
            serial,
            parallel,
            result,
        })
    })
    .await?
}

/// Fails with `BufferLeak` unless every result buffer on `ledger` was
/// released exactly once.
pub fn check_released(ledger: &BufferLedger) -> Result<(), Error> {
    if ledger.is_balanced() {
        return Ok(());
    }
    Err(Error::BufferLeak {
        outstanding: ledger.outstanding(),
        over_released: ledger.over_released(),
    })
}

/// Fails with `Divergence` at the first cell where the results differ.
pub fn verify(expected: &Matrix, actual: &Matrix) -> Result<(), Error> {
    let cols = expected.cols().max(1);
    if expected.shape() != actual.shape() {
        return Err(Error::Divergence {
            row: expected.rows().min(actual.rows()),
            col: 0,
        });
    }

    match expected
        .as_slice()
        .iter()
        .zip(actual.as_slice())
        .position(|(x, y)| x.to_bits() != y.to_bits())
    {
        Some(idx) => Err(Error::Divergence {
            row: idx / cols,
            col: idx % cols,
        }),
        None => Ok(()),
    }
}
