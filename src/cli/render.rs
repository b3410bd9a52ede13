//! Rendering commands (`cardsmith render ...`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use image::DynamicImage;

use cardsmith::render_card_image;

use crate::cli::common::TemplateArg;
use crate::cli::utils::{ensure_parent_dir, load_card, load_fonts, load_icons, load_set, report_warnings};

/// Available render subcommands.
#[derive(Subcommand, Debug)]
pub enum RenderCommand {
    /// Render one card definition to a PNG.
    Image(RenderImageArgs),
    /// Render every card of a set file into a directory.
    Set(RenderSetArgs),
}

/// Args for `cardsmith render image`.
#[derive(Args, Debug)]
pub struct RenderImageArgs {
    /// Card definition file (JSON).
    pub card: PathBuf,
    /// Output PNG path.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Directory holding the font set.
    #[arg(long)]
    pub fonts: PathBuf,
    /// Directory holding icon bitmaps; omitted icons render badge-only.
    #[arg(long)]
    pub icons: Option<PathBuf>,
    /// Override the card's template.
    #[arg(long, value_enum)]
    pub template: Option<TemplateArg>,
    /// Extra boldable keywords (semicolon-separated).
    #[arg(long)]
    pub keywords: Option<String>,
    /// Override the description start font size.
    #[arg(long)]
    pub size: Option<f32>,
}

/// Args for `cardsmith render set`.
#[derive(Args, Debug)]
pub struct RenderSetArgs {
    /// Set file to render (JSONL).
    pub set: PathBuf,
    /// Output directory for generated PNGs.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Directory holding the font set.
    #[arg(long)]
    pub fonts: PathBuf,
    /// Directory holding icon bitmaps; omitted icons render badge-only.
    #[arg(long)]
    pub icons: Option<PathBuf>,
    /// Extra boldable keywords applied to every card.
    #[arg(long)]
    pub keywords: Option<String>,
}

/// Execute a render command.
pub fn handle(command: RenderCommand) -> Result<()> {
    match command {
        RenderCommand::Image(args) => image(args),
        RenderCommand::Set(args) => set(args),
    }
}

fn image(args: RenderImageArgs) -> Result<()> {
    let mut card = load_card(&args.card)?;
    if let Some(template) = args.template {
        card.template = template.name().to_string();
    }
    if let Some(size) = args.size {
        card.description_size = size;
    }
    report_warnings(&card.title, &card.validate());

    let fonts = load_fonts(&args.fonts)?;
    let icons = load_icons(args.icons.as_ref());
    let rendered = render_card_image(&card, &fonts, &icons, args.keywords.as_deref())?;

    ensure_parent_dir(&args.output)?;
    DynamicImage::ImageRgba8(rendered)
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Rendered '{}' to {}", card.title, args.output.display());
    Ok(())
}

fn set(args: RenderSetArgs) -> Result<()> {
    let set = load_set(&args.set)?;
    let fonts = load_fonts(&args.fonts)?;
    let icons = load_icons(args.icons.as_ref());

    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create output directory {}", args.output.display()))?;

    for (idx, card) in set.cards.iter().enumerate() {
        report_warnings(&card.title, &card.validate());
        let rendered = render_card_image(card, &fonts, &icons, args.keywords.as_deref())?;
        let target = args.output.join(format!("card_{:04}.png", idx + 1));
        DynamicImage::ImageRgba8(rendered)
            .save(&target)
            .with_context(|| format!("failed to write {}", target.display()))?;
    }

    println!(
        "Rendered {} card image(s) to {}",
        set.cards.len(),
        args.output.display()
    );
    Ok(())
}
