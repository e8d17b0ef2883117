use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod merge;
mod parsing;
mod repair;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("homref_fill=debug,info")
    } else {
        EnvFilter::new("homref_fill=warn")
    };

    // stdout carries the VCF stream
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Insert(args) => {
            cli::insert::run(args)?;
        }
        cli::Commands::Repair(args) => {
            cli::repair::run(args)?;
        }
    }

    Ok(())
}
