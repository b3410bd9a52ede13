use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    env_logger::init();
    let parsed = cli::Cli::parse();
    cli::run(parsed)
}
