//! Font loading and face selection.
//!
//! A render needs a full set of faces up front; a card cannot be measured
//! without them, so a missing or unparsable font file is the one condition
//! that fails loudly instead of degrading.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use thiserror::Error;

use crate::text::token::StyleState;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("font '{stem}' not found in {dir} (tried {stem}.ttf and {stem}.otf)")]
    Missing { stem: &'static str, dir: PathBuf },
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("font file {path} could not be parsed")]
    Parse { path: PathBuf },
}

/// Which family a piece of text draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    /// Card titles and type lines.
    Title,
    /// Latin-only titles use a dedicated face.
    TitleLatin,
    /// Description body text; honors bold/italic styling.
    Body,
    /// Cost numerals, icon badges, and the price line.
    Numeral,
}

/// Vertical metrics of a face at a size.
#[derive(Debug, Clone, Copy)]
pub struct LineMetrics {
    pub ascent: f32,
    /// Distance below the baseline, as a positive number.
    pub descent: f32,
    pub height: f32,
}

/// The complete set of faces a card render draws from.
pub struct FontSet {
    title: FontVec,
    title_latin: FontVec,
    body: FontVec,
    body_bold: FontVec,
    body_italic: FontVec,
    body_bold_italic: FontVec,
    numeral: FontVec,
}

impl FontSet {
    /// Load every face from `dir`. File stems are fixed
    /// (`title`, `title-latin`, `body`, `body-bold`, `body-italic`,
    /// `body-bold-italic`, `numeral`), with `.ttf` preferred over `.otf`.
    pub fn load(dir: &Path) -> Result<Self, FontError> {
        Ok(Self {
            title: load_face(dir, "title")?,
            title_latin: load_face(dir, "title-latin")?,
            body: load_face(dir, "body")?,
            body_bold: load_face(dir, "body-bold")?,
            body_italic: load_face(dir, "body-italic")?,
            body_bold_italic: load_face(dir, "body-bold-italic")?,
            numeral: load_face(dir, "numeral")?,
        })
    }

    /// Select the face for a role under the active style. Only the body
    /// family carries weight/slant variants.
    pub fn face(&self, role: FontRole, style: StyleState) -> &FontVec {
        match role {
            FontRole::Title => &self.title,
            FontRole::TitleLatin => &self.title_latin,
            FontRole::Numeral => &self.numeral,
            FontRole::Body => match (style.bold, style.italic) {
                (true, true) => &self.body_bold_italic,
                (true, false) => &self.body_bold,
                (false, true) => &self.body_italic,
                (false, false) => &self.body,
            },
        }
    }

    pub fn line_metrics(&self, role: FontRole, style: StyleState, size: f32) -> LineMetrics {
        let scaled = self.face(role, style).as_scaled(PxScale::from(size));
        let ascent = scaled.ascent();
        let descent = -scaled.descent();
        LineMetrics {
            ascent,
            descent,
            height: ascent + descent,
        }
    }
}

fn load_face(dir: &Path, stem: &'static str) -> Result<FontVec, FontError> {
    for ext in ["ttf", "otf"] {
        let path = dir.join(format!("{stem}.{ext}"));
        if !path.exists() {
            continue;
        }
        let bytes = std::fs::read(&path).map_err(|source| FontError::Io {
            path: path.clone(),
            source,
        })?;
        return FontVec::try_from_vec(bytes).map_err(|_| FontError::Parse { path });
    }
    Err(FontError::Missing {
        stem,
        dir: dir.to_path_buf(),
    })
}
