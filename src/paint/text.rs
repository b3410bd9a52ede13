//! Glyph rendering.
//!
//! Walks finished [`DisplayLine`]s and paints words, icons, and decorations
//! onto an RGBA surface. Every advance goes through the same measurement
//! primitive the line breaker used, so wrapping and paint cannot disagree.

use ab_glyph::PxScale;
use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::fonts::{FontRole, FontSet};
use crate::icons::{BadgeColor, IconAssets, IconRegistry};
use crate::text::breaker::{Banner, LINE_FACTOR, LINE_PAD, LineKind};
use crate::text::measure::{FontMeasurer, ICON_SLOT, TextMeasurer};
use crate::text::token::{IconToken, MarkupToken, StyleState, classify_word};
use crate::text::{LayoutResult, TextFrame, tokens_width};

/// Base size of an icon badge numeral before digit-count scaling.
const BADGE_BASE_SIZE: f32 = 115.0;

/// Shrink step for single-line fitting (titles, type lines).
const SINGLE_LINE_STEP: f32 = 2.0;

/// Bold size and glyph scale used by standalone icon banner lines.
const BANNER_ICON_SCALE: f32 = 1.6;

const UNDERLINE_THICKNESS: u32 = 4;
const RULE_THICKNESS: u32 = 10;

/// Phrases that force their whole line italic with a hardened first space.
const ITALIC_LEAD_INS: &[&str] = &["Heirloom:", "家宝:", "Erbstück:"];

/// Per-line paint parameters.
#[derive(Clone, Copy)]
struct PaintCtx {
    size: f32,
    icon_scale: f32,
    icon_y_offset: f32,
    role: FontRole,
    color: Rgba<u8>,
}

/// Paints layout results and single lines using a shared font/icon set.
pub struct TextPainter<'a> {
    fonts: &'a FontSet,
    icons: &'a IconAssets,
}

impl<'a> TextPainter<'a> {
    pub fn new(fonts: &'a FontSet, icons: &'a IconAssets) -> Self {
        Self { fonts, icons }
    }

    fn measure(&self, role: FontRole, text: &str, style: StyleState, size: f32) -> f32 {
        FontMeasurer::new(self.fonts, role).width(text, style, size)
    }

    /// Paint a fitted description block into its frame. The block is
    /// vertically centered; the layout itself is never mutated.
    pub fn paint_layout(
        &self,
        img: &mut RgbaImage,
        layout: &LayoutResult,
        frame: &TextFrame,
        banner_size: f32,
        color: Rgba<u8>,
    ) {
        let size = layout.font_size;
        let mut y = frame.center_y - (layout.total_height - LINE_FACTOR * (size + LINE_PAD)) / 2.0;

        for line in &layout.lines {
            match line.kind {
                LineKind::Blank => {}
                LineKind::Rule => {
                    let rect = Rect::at(
                        (frame.center_x / 2.0).round() as i32,
                        (y - size * 0.375 - 5.0).round() as i32,
                    )
                    .of_size(frame.center_x.max(1.0) as u32, RULE_THICKNESS);
                    draw_filled_rect_mut(img, rect, color);
                }
                LineKind::Text => {
                    let x = if line.centered {
                        frame.center_x - line.width / 2.0
                    } else {
                        frame.center_x - frame.max_width / 2.0
                    };
                    let ctx = match line.banner {
                        Some(Banner::Plus) => PaintCtx {
                            size: banner_size,
                            icon_scale: banner_size / 96.0 * 1.2,
                            icon_y_offset: 0.0,
                            role: FontRole::Body,
                            color,
                        },
                        Some(Banner::Icon) => PaintCtx {
                            size: crate::text::breaker::ICON_BANNER_SIZE,
                            icon_scale: BANNER_ICON_SCALE * 1.2,
                            icon_y_offset: 115.0 - size / 96.0 * 48.0,
                            role: FontRole::Body,
                            color,
                        },
                        None => PaintCtx {
                            size,
                            icon_scale: size / 96.0 * 1.2,
                            icon_y_offset: 0.0,
                            role: FontRole::Body,
                            color,
                        },
                    };
                    self.paint_line(img, &line.tokens, x, y, ctx);
                }
            }
            y += line.height;
        }
    }

    /// Paint one line of tokens starting at `x`, vertically centered on
    /// `y_mid`.
    fn paint_line(&self, img: &mut RgbaImage, tokens: &[MarkupToken], x: f32, y_mid: f32, ctx: PaintCtx) {
        let force_italic = tokens.iter().any(|token| {
            matches!(token, MarkupToken::Word(text)
                if ITALIC_LEAD_INS.iter().any(|lead| text.contains(lead)))
        });

        let mut style = StyleState::default();
        let mut cursor = x;
        for token in tokens {
            match token {
                MarkupToken::StyleStart(kind) => style.set(*kind, true),
                MarkupToken::StyleEnd(kind) => style.set(*kind, false),
                MarkupToken::Word(text) => {
                    let painted = if force_italic {
                        StyleState {
                            italic: true,
                            ..style
                        }
                    } else {
                        style
                    };
                    let text = if force_italic {
                        text.replacen(' ', "\u{a0}", 1)
                    } else {
                        text.clone()
                    };
                    cursor += self.paint_word(img, &text, cursor, y_mid, painted, ctx);
                }
                MarkupToken::Icon(icon) => {
                    cursor += self.paint_icon(img, icon, cursor, y_mid, style, ctx);
                }
            }
        }
    }

    fn paint_word(
        &self,
        img: &mut RgbaImage,
        text: &str,
        x: f32,
        y_mid: f32,
        style: StyleState,
        ctx: PaintCtx,
    ) -> f32 {
        let width = self.measure(ctx.role, text, style, ctx.size);
        let metrics = self.fonts.line_metrics(ctx.role, style, ctx.size);
        let top = y_mid - metrics.height / 2.0;
        let font = self.fonts.face(ctx.role, style);
        draw_text_mut(
            img,
            ctx.color,
            x.round() as i32,
            top.round() as i32,
            PxScale::from(ctx.size),
            font,
            text,
        );
        if style.underline && width >= 1.0 {
            let bar = Rect::at(
                x.round() as i32,
                (y_mid + metrics.height / 2.0 + 4.0).round() as i32,
            )
            .of_size(width as u32, UNDERLINE_THICKNESS);
            draw_filled_rect_mut(img, bar, ctx.color);
        }
        width
    }

    /// Paint an icon token: bold sign prefix, the bitmap centered in its
    /// three-space slot, and the numeric badge over it. A missing bitmap
    /// degrades to badge-only. Returns the advance, which always equals the
    /// breaker's [`crate::text::measure::icon_width`].
    fn paint_icon(
        &self,
        img: &mut RgbaImage,
        icon: &IconToken,
        x: f32,
        y_mid: f32,
        style: StyleState,
        ctx: PaintCtx,
    ) -> f32 {
        let mut cursor = x;
        if let Some(sign) = icon.sign {
            let mut buf = [0u8; 4];
            let sign_str = sign.encode_utf8(&mut buf);
            cursor += self.paint_word(img, sign_str, cursor, y_mid, style.bolded(), ctx);
        }

        let slot = self.measure(ctx.role, ICON_SLOT, style, ctx.size);
        let center_x = cursor + slot / 2.0;
        let center_y = y_mid + ctx.icon_y_offset;

        if let Some(bitmap) = self.icons.get(icon.key) {
            let width = (bitmap.width() as f32 * ctx.icon_scale).round().max(1.0) as u32;
            let height = (bitmap.height() as f32 * ctx.icon_scale).round().max(1.0) as u32;
            let resized = imageops::resize(bitmap, width, height, imageops::FilterType::Triangle);
            imageops::overlay(
                img,
                &resized,
                (center_x - width as f32 / 2.0).round() as i64,
                (center_y - height as f32 / 2.0).round() as i64,
            );
        }

        if !icon.amount.is_empty() {
            let badge_color = match IconRegistry::get(icon.key).map(|def| def.badge_color) {
                Some(BadgeColor::White) => Rgba([255, 255, 255, 255]),
                _ => Rgba([0, 0, 0, 255]),
            };
            let badge = badge_layout(&icon.amount);
            let badge_px = BADGE_BASE_SIZE * badge.scale * ctx.icon_scale;
            self.draw_centered(img, &badge.number, center_x, center_y, badge_px, badge_color);
            if let Some(special) = badge.special {
                let special_px = special.size * ctx.icon_scale;
                let mut buf = [0u8; 4];
                self.draw_centered(
                    img,
                    special.glyph.encode_utf8(&mut buf),
                    center_x + 40.0 * ctx.icon_scale,
                    center_y - 20.0 * ctx.icon_scale + special.y_shift * ctx.icon_scale,
                    special_px,
                    badge_color,
                );
            }
        }

        cursor - x + slot
    }

    fn draw_centered(
        &self,
        img: &mut RgbaImage,
        text: &str,
        center_x: f32,
        y_mid: f32,
        size: f32,
        color: Rgba<u8>,
    ) {
        let style = StyleState::default();
        let width = self.measure(FontRole::Numeral, text, style, size);
        let metrics = self.fonts.line_metrics(FontRole::Numeral, style, size);
        let font = self.fonts.face(FontRole::Numeral, style);
        draw_text_mut(
            img,
            color,
            (center_x - width / 2.0).round() as i32,
            (y_mid - metrics.height / 2.0).round() as i32,
            PxScale::from(size),
            font,
            text,
        );
    }

    /// Paint a centered single line (title, type line, heirloom banner),
    /// shrinking the size in steps of two until the line fits `max_width`.
    /// Latin-only lines without icons use the Latin title face. Returns the
    /// chosen size.
    pub fn paint_single_line(
        &self,
        img: &mut RgbaImage,
        text: &str,
        center_x: f32,
        y_mid: f32,
        max_width: f32,
        start_size: f32,
        color: Rgba<u8>,
    ) -> f32 {
        let tokens = classify_line(text);
        let has_icon = tokens
            .iter()
            .any(|token| matches!(token, MarkupToken::Icon(_)));
        let is_ascii = text.chars().all(|ch| (' '..='~').contains(&ch));
        let role = if is_ascii && !has_icon {
            FontRole::TitleLatin
        } else {
            FontRole::Title
        };

        let measurer = FontMeasurer::new(self.fonts, role);
        let mut size = start_size + SINGLE_LINE_STEP;
        let mut width;
        loop {
            size -= SINGLE_LINE_STEP;
            width = tokens_width(&tokens, size, &measurer);
            if max_width <= 0.0 || width <= max_width || size <= SINGLE_LINE_STEP {
                break;
            }
        }

        let ctx = PaintCtx {
            size,
            icon_scale: size / 90.0 * 1.2,
            icon_y_offset: 0.0,
            role,
            color,
        };
        self.paint_line(img, &tokens, center_x - width / 2.0, y_mid, ctx);
        size
    }

    /// Paint the price line left-aligned at a fixed size in the numeral face.
    pub fn paint_price_line(
        &self,
        img: &mut RgbaImage,
        text: &str,
        x: f32,
        y_mid: f32,
        size: f32,
        color: Rgba<u8>,
    ) {
        let tokens = classify_line(text);
        let ctx = PaintCtx {
            size,
            icon_scale: size / 90.0 * 1.2,
            icon_y_offset: 0.0,
            role: FontRole::Numeral,
            color,
        };
        self.paint_line(img, &tokens, x, y_mid, ctx);
    }

    /// Paint a credit line flush left or right of `x`.
    pub fn paint_credit(
        &self,
        img: &mut RgbaImage,
        text: &str,
        x: f32,
        y_mid: f32,
        size: f32,
        align_right: bool,
        color: Rgba<u8>,
    ) {
        if text.is_empty() {
            return;
        }
        let style = StyleState::default();
        let width = self.measure(FontRole::TitleLatin, text, style, size);
        let start = if align_right { x - width } else { x };
        let metrics = self.fonts.line_metrics(FontRole::TitleLatin, style, size);
        draw_text_mut(
            img,
            color,
            start.round() as i32,
            (y_mid - metrics.height / 2.0).round() as i32,
            PxScale::from(size),
            self.fonts.face(FontRole::TitleLatin, style),
            text,
        );
    }
}

/// Classify a whole line, preserving the spaces between its blocks.
fn classify_line(text: &str) -> Vec<MarkupToken> {
    let mut tokens = Vec::new();
    for (index, block) in text.split(' ').filter(|block| !block.is_empty()).enumerate() {
        if index > 0 {
            tokens.push(MarkupToken::Word(" ".to_string()));
        }
        tokens.extend(classify_word(block));
    }
    tokens
}

/// Badge numeral scaling and trailing cost-marker substitution.
struct BadgeLayout {
    number: String,
    special: Option<SpecialCost>,
    scale: f32,
}

struct SpecialCost {
    glyph: char,
    size: f32,
    y_shift: f32,
}

/// The badge shrinks as digits accumulate; a trailing `*` keeps its glyph
/// at size 65 and a trailing `+` becomes `✚` at size 40.
fn badge_layout(amount: &str) -> BadgeLayout {
    let chars: Vec<char> = amount.chars().collect();
    if chars.len() < 2 {
        return BadgeLayout {
            number: amount.to_string(),
            special: None,
            scale: 1.0,
        };
    }

    let digits: String = chars[..chars.len() - 1].iter().collect();
    let marker_scale = if chars.len() > 2 {
        1.5 / (chars.len() - 1) as f32
    } else {
        1.0
    };
    match chars[chars.len() - 1] {
        '*' => BadgeLayout {
            number: digits,
            special: Some(SpecialCost {
                glyph: '*',
                size: 65.0,
                y_shift: 10.0,
            }),
            scale: marker_scale,
        },
        '+' => BadgeLayout {
            number: digits,
            special: Some(SpecialCost {
                glyph: '✚',
                size: 40.0,
                y_shift: 0.0,
            }),
            scale: marker_scale,
        },
        _ => BadgeLayout {
            number: amount.to_string(),
            special: None,
            scale: 1.5 / chars.len() as f32,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_digit_badge_keeps_full_size() {
        let badge = badge_layout("3");
        assert_eq!(badge.number, "3");
        assert!(badge.special.is_none());
        assert_eq!(badge.scale, 1.0);
    }

    #[test]
    fn multi_digit_badges_shrink() {
        assert_eq!(badge_layout("12").scale, 0.75);
        assert_eq!(badge_layout("123").scale, 0.5);
    }

    #[test]
    fn star_marker_keeps_its_glyph() {
        let badge = badge_layout("3*");
        assert_eq!(badge.number, "3");
        let special = badge.special.expect("star cost marker");
        assert_eq!(special.glyph, '*');
        assert_eq!(special.size, 65.0);
        assert_eq!(badge.scale, 1.0);
    }

    #[test]
    fn plus_marker_substitutes_the_heavy_cross() {
        let badge = badge_layout("4+");
        let special = badge.special.expect("overpay cost marker");
        assert_eq!(special.glyph, '✚');
        assert_eq!(special.size, 40.0);
    }

    #[test]
    fn digits_before_a_marker_still_shrink() {
        assert_eq!(badge_layout("12*").scale, 0.75);
    }

    #[test]
    fn classify_line_keeps_inter_block_spaces() {
        let tokens = classify_line("Worth $2 each");
        assert_eq!(
            tokens
                .iter()
                .filter(|token| matches!(token, MarkupToken::Word(word) if word == " "))
                .count(),
            2
        );
        assert!(tokens.iter().any(|token| matches!(token, MarkupToken::Icon(_))));
    }
}
