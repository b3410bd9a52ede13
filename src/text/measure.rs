//! Width measurement port.
//!
//! Line-breaking decisions and final painting must agree on glyph widths, so
//! both go through [`TextMeasurer`]. The real implementation sums kerned
//! advances over the loaded fonts; a fixed-advance measurer stands in when no
//! rendering surface is available (dry-run validation, tests).

use ab_glyph::{Font, PxScale, ScaleFont};

use crate::fonts::{FontRole, FontSet};
use crate::text::token::{IconToken, StyleState};

/// Inline icons reserve the width of three spaces in the current font.
pub const ICON_SLOT: &str = "   ";

/// Measures the advance width of text under a style at a font size.
pub trait TextMeasurer {
    fn width(&self, text: &str, style: StyleState, size: f32) -> f32;
}

/// Width of an icon token: the three-space slot plus its bold sign prefix.
/// Shared by the breaker and the renderer so they can never disagree.
pub fn icon_width(
    icon: &IconToken,
    style: StyleState,
    size: f32,
    measurer: &dyn TextMeasurer,
) -> f32 {
    let mut width = measurer.width(ICON_SLOT, style, size);
    if let Some(sign) = icon.sign {
        let mut buf = [0u8; 4];
        width += measurer.width(sign.encode_utf8(&mut buf), style.bolded(), size);
    }
    width
}

/// Kerned advance measurement over a loaded [`FontSet`].
pub struct FontMeasurer<'a> {
    fonts: &'a FontSet,
    role: FontRole,
}

impl<'a> FontMeasurer<'a> {
    pub fn new(fonts: &'a FontSet, role: FontRole) -> Self {
        Self { fonts, role }
    }
}

impl TextMeasurer for FontMeasurer<'_> {
    fn width(&self, text: &str, style: StyleState, size: f32) -> f32 {
        let font = self.fonts.face(self.role, style);
        let scaled = font.as_scaled(PxScale::from(size));
        let mut width = 0.0f32;
        let mut prev = None;
        for ch in text.chars() {
            let glyph = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, glyph);
            }
            width += scaled.h_advance(glyph);
            prev = Some(glyph);
        }
        width
    }
}

/// Deterministic fixed-advance measurer: every character is `advance * size`
/// wide regardless of style. Lets the layout engine run without fonts.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    pub advance: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn width(&self, text: &str, _style: StyleState, size: f32) -> f32 {
        text.chars().count() as f32 * self.advance * size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::token::classify_word;
    use pretty_assertions::assert_eq;

    #[test]
    fn monospace_width_scales_with_size_and_length() {
        let m = MonospaceMeasurer { advance: 0.5 };
        assert_eq!(m.width("abcd", StyleState::default(), 10.0), 20.0);
        assert_eq!(m.width("", StyleState::default(), 10.0), 0.0);
    }

    #[test]
    fn icon_width_adds_the_sign_prefix() {
        let m = MonospaceMeasurer { advance: 1.0 };
        let tokens = classify_word("+$2");
        let crate::text::token::MarkupToken::Icon(icon) = &tokens[0] else {
            panic!("expected icon token");
        };
        // Three slot spaces plus one sign character.
        assert_eq!(icon_width(icon, StyleState::default(), 10.0, &m), 40.0);
    }
}
