use clap::Parser;
use tracing_subscriber::EnvFilter;

use matmul::cli::{Cli, Command};
use matmul::{bench, generate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => {
            let report = bench::run(args).await?;
            println!("{}", report);
        }
        Command::Generate(args) => {
            generate::run(args).await?;
        }
    }

    Ok(())
}
