//! Text layout engine.
//!
//! The pipeline is a pure function of its inputs: raw description text is
//! emphasized ([`crate::keywords`]), split into paragraphs, classified into
//! markup tokens, broken into display lines against a width, and shrunk
//! until the block fits its frame. No state survives between renders, so
//! repeated calls with the same inputs yield identical layouts.

pub mod breaker;
pub mod fit;
pub mod measure;
pub mod token;

pub use breaker::{Banner, DisplayLine, LineKind, break_paragraphs, tokens_width};
pub use fit::{LayoutResult, MIN_FONT_SIZE, TextFrame, fit_description, fit_paragraphs};
pub use measure::{FontMeasurer, ICON_SLOT, MonospaceMeasurer, TextMeasurer, icon_width};
pub use token::{IconToken, MarkupToken, StyleKind, StyleState, classify_word};

use crate::keywords::KeywordSet;

/// Knobs for one description layout.
pub struct LayoutOptions {
    /// Font size the fit loop starts from.
    pub start_size: f32,
    /// Bold size used by `+`-prefixed banner lines.
    pub banner_size: f32,
    pub keywords: KeywordSet,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            start_size: 40.0,
            banner_size: 40.0,
            keywords: KeywordSet::default(),
        }
    }
}

/// Split raw input into newline-delimited paragraphs, dropping whitespace
/// around the line breaks. A whitespace-only paragraph becomes a spacer, a
/// lone `-` a horizontal rule (see [`breaker`]).
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paragraphs_split_on_newlines_and_trim() {
        assert_eq!(
            split_paragraphs("one two \n  \n- \nthree"),
            vec!["one two", "", "-", "three"]
        );
    }
}
