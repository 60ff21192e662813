//! Interactive worker-count prompt.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::Error;

const PROMPT: &str = "Number of workers: ";

/// Asks for a worker count on stdin.
pub async fn ask_worker_count() -> Result<usize, Error> {
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    read_worker_count(&mut stdin, &mut stdout).await
}

/// Writes the prompt to `output` and reads one line from `input`.
///
/// Non-numeric input is `InvalidInput`; zero or negative counts are
/// rejected as `InvalidWorkerCount`.
pub async fn read_worker_count<R, W>(input: &mut R, output: &mut W) -> Result<usize, Error>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(PROMPT.as_bytes()).await?;
    output.flush().await?;

    let mut line = String::new();
    input.read_line(&mut line).await?;
    let line = line.trim();

    let raw = line
        .parse::<i64>()
        .map_err(|_| Error::InvalidInput(line.to_string()))?;
    Ok(matrix_mul::worker_count(raw)?)
}
