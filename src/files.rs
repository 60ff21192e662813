//! Reading and writing matrix text files.

use std::path::Path;

use matrix_mul::Matrix;
use tracing::debug;

use crate::Error;

/// Loads a whitespace-delimited matrix file.
pub async fn read_matrix(path: &Path) -> Result<Matrix, Error> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let matrix = content.parse::<Matrix>().map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), rows = matrix.rows(), cols = matrix.cols(), "loaded matrix");
    Ok(matrix)
}

/// Writes `matrix` with two decimals per element, one row per line.
pub async fn write_matrix(path: &Path, matrix: &Matrix) -> Result<(), Error> {
    tokio::fs::write(path, matrix.to_string())
        .await
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}
