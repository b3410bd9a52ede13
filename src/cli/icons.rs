//! Icon registry listing (`cardsmith icons ...`).

use anyhow::Result;
use clap::Subcommand;

use cardsmith::IconRegistry;
use cardsmith::icons::{BadgeColor, IconCategory};

/// Available icon subcommands.
#[derive(Subcommand, Debug)]
pub enum IconsCommand {
    /// Print the registered icon triggers.
    List,
}

/// Execute an icons command.
pub fn handle(command: IconsCommand) -> Result<()> {
    match command {
        IconsCommand::List => list(),
    }
}

fn list() -> Result<()> {
    println!("{:<8} {:<10} {:<7} {:<9} label", "trigger", "asset", "badge", "category");
    for def in IconRegistry::list() {
        let badge = match def.badge_color {
            BadgeColor::White => "white",
            BadgeColor::Black => "black",
        };
        let category = match def.category {
            IconCategory::Treasure => "treasure",
            IconCategory::Victory => "victory",
        };
        println!(
            "{:<8} {:<10} {:<7} {:<9} {}",
            def.trigger, def.asset, badge, category, def.label
        );
    }
    Ok(())
}
