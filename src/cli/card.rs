//! Card definition operations (`cardsmith card ...`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use cardsmith::text::{LayoutOptions, MonospaceMeasurer, fit_description};
use cardsmith::{CardSpec, KeywordSet, TemplateRegistry};

use crate::cli::utils::{load_card, report_warnings, write_output};

/// Available card subcommands.
#[derive(Subcommand, Debug)]
pub enum CardCommand {
    /// Write a filled-in starter card definition.
    New(NewArgs),
    /// Check a card definition and dry-run its description layout.
    Validate(ValidateArgs),
}

/// Args for `cardsmith card new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output", default_value = "-")]
    pub output: PathBuf,
}

/// Args for `cardsmith card validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Card definition file to check.
    pub card: PathBuf,
}

/// Execute a card command.
pub fn handle(command: CardCommand) -> Result<()> {
    match command {
        CardCommand::New(args) => new(args),
        CardCommand::Validate(args) => validate(args),
    }
}

fn new(args: NewArgs) -> Result<()> {
    let card = CardSpec::example();
    let mut json = serde_json::to_string_pretty(&card)?;
    json.push('\n');
    write_output(&args.output, &json)?;
    if args.output.as_os_str() != "-" {
        println!("Wrote starter card to {}", args.output.display());
    }
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let card = load_card(&args.card)?;
    let warnings = card.validate();
    report_warnings(&card.title, &warnings);

    // Dry-run the layout with a fixed-advance measurer so problems surface
    // without fonts on hand.
    let template = TemplateRegistry::get(&card.template).unwrap_or_else(|_| {
        TemplateRegistry::list()[0]
    });
    let opts = LayoutOptions {
        start_size: card.description_size,
        banner_size: template.banner_size,
        keywords: KeywordSet::new(&card.bold_keywords),
    };
    let layout = fit_description(
        &card.description,
        &template.description_frame,
        &opts,
        &MonospaceMeasurer::default(),
    );
    println!(
        "'{}': {} line(s) at size {} over template '{}', {} warning(s)",
        card.title,
        layout.lines.len(),
        layout.font_size,
        template.name,
        warnings.len()
    );
    Ok(())
}
