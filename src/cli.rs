//! Command-line configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "matmul",
    version,
    about = "Compare serial and parallel matrix multiplication"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Multiply A by B serially and in parallel, and report the timings
    Run(RunArgs),
    /// Write a pair of compatible input matrices
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Left-hand matrix file
    #[arg(long, default_value = "A.txt")]
    pub a: PathBuf,

    /// Right-hand matrix file
    #[arg(long, default_value = "B.txt")]
    pub b: PathBuf,

    /// Where to write the product
    #[arg(long, default_value = "C.txt")]
    pub out: PathBuf,

    /// Number of workers; prompted for on stdin when absent
    #[arg(long, env = "MATMUL_WORKERS", allow_negative_numbers = true)]
    pub workers: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Rows of A
    #[arg(long)]
    pub rows: usize,

    /// Columns of A and rows of B
    #[arg(long)]
    pub inner: usize,

    /// Columns of B
    #[arg(long)]
    pub cols: usize,

    /// Seed for reproducible random values
    #[arg(long, conflicts_with = "sequential")]
    pub seed: Option<u64>,

    /// Fill with 1, 2, 3, ... instead of random values
    #[arg(long)]
    pub sequential: bool,

    #[arg(long, default_value = "A.txt")]
    pub a: PathBuf,

    #[arg(long, default_value = "B.txt")]
    pub b: PathBuf,
}
