//! Command-line interface wiring for the `cardsmith` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod card;
pub mod common;
pub mod icons;
pub mod render;
pub mod utils;

/// Parsed CLI entrypoint for the `cardsmith` binary.
#[derive(Parser, Debug)]
#[command(
    name = "cardsmith",
    version,
    about = "Trading-card image generator with markup-aware text layout"
)]
pub struct Cli {
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Render(render::RenderCommand),
    #[command(subcommand)]
    Card(card::CardCommand),
    #[command(subcommand)]
    Icons(icons::IconsCommand),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(cmd) => render::handle(cmd),
        Command::Card(cmd) => card::handle(cmd),
        Command::Icons(cmd) => icons::handle(cmd),
    }
}
