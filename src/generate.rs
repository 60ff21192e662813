//! Input matrix generation.

use matrix_mul::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::cli::GenerateArgs;
use crate::{Error, files};

/// How generated matrices are filled.
#[derive(Debug)]
pub enum Fill {
    /// 1, 2, 3, ... in row-major order.
    Sequential,
    /// Uniform values in `[0, 100)` rounded to two decimals.
    Random(StdRng),
}

impl Fill {
    pub fn from_args(args: &GenerateArgs) -> Self {
        if args.sequential {
            return Fill::Sequential;
        }
        match args.seed {
            Some(seed) => Fill::Random(StdRng::seed_from_u64(seed)),
            None => Fill::Random(StdRng::from_entropy()),
        }
    }

    /// Builds a `rows x cols` matrix.
    pub fn matrix(&mut self, rows: usize, cols: usize) -> Result<Matrix, Error> {
        let data = match self {
            Fill::Sequential => (1..=rows * cols).map(|v| v as f64).collect(),
            Fill::Random(rng) => (0..rows * cols)
                .map(|_| (rng.gen_range(0.0..100.0_f64) * 100.0).round() / 100.0)
                .collect(),
        };
        Ok(Matrix::from_vec(rows, cols, data)?)
    }
}

/// Writes `rows x inner` matrix A and `inner x cols` matrix B.
pub async fn run(args: GenerateArgs) -> Result<(Matrix, Matrix), Error> {
    let mut fill = Fill::from_args(&args);
    let a = fill.matrix(args.rows, args.inner)?;
    let b = fill.matrix(args.inner, args.cols)?;

    files::write_matrix(&args.a, &a).await?;
    files::write_matrix(&args.b, &b).await?;
    info!(
        a = %args.a.display(),
        b = %args.b.display(),
        "generated {}x{} and {}x{} matrices",
        args.rows,
        args.inner,
        args.inner,
        args.cols
    );

    Ok((a, b))
}
