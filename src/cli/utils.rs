//! Convenience helpers shared across command handlers.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardsmith::{CardSet, CardSpec, FontSet, IconAssets};

/// Load a card definition, attaching path context to any error.
pub fn load_card(path: &Path) -> Result<CardSpec> {
    CardSpec::load(path)
}

/// Load a set file, attaching path context to any error.
pub fn load_set(path: &Path) -> Result<CardSet> {
    CardSet::load(path).with_context(|| format!("failed to read set {}", path.display()))
}

/// Load the required font set; this is the render's only fatal dependency.
pub fn load_fonts(dir: &Path) -> Result<FontSet> {
    FontSet::load(dir).with_context(|| format!("failed to load fonts from {}", dir.display()))
}

/// Load icon bitmaps when a directory is given; otherwise render badge-only.
pub fn load_icons(dir: Option<&PathBuf>) -> IconAssets {
    match dir {
        Some(dir) => IconAssets::load(dir),
        None => IconAssets::empty(),
    }
}

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Ensure the parent directory of an output file exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    Ok(())
}

/// Print validation warnings in a consistent shape.
pub fn report_warnings(label: &str, warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning ({label}): {warning}");
    }
}
