mod cli;

use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jpath=warn")),
        )
        .init();

    let cli = cli::Cli::parse();
    cli::run(&cli)
}
