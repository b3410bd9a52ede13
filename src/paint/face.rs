//! Card face composition.
//!
//! Paints the full card: background, bands, frame, then the title, type
//! line, price icons, description block, and credits through the text
//! painter. Flat fills stand in for artwork layers; pixel recoloring is
//! deliberately out of scope.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::card::CardSpec;
use crate::fonts::{FontRole, FontSet};
use crate::icons::{IconAssets, IconRegistry};
use crate::keywords::KeywordSet;
use crate::paint::text::TextPainter;
use crate::templates::CardTemplate;
use crate::text::{FontMeasurer, LayoutOptions, fit_description};

const TITLE_BAND_HEIGHT: u32 = 140;
const TYPE_BAND_HEIGHT: u32 = 110;

struct Palette {
    background: Rgba<u8>,
    panel: Rgba<u8>,
    band: Rgba<u8>,
    frame: Rgba<u8>,
    text: Rgba<u8>,
    credit: Rgba<u8>,
}

fn palette() -> Palette {
    Palette {
        background: rgba(0xf4, 0xe8, 0xcc, 0xff),
        panel: rgba(0xfa, 0xf2, 0xe0, 0xff),
        band: rgba(0xe6, 0xcb, 0xa6, 0xff),
        frame: rgba(0x7d, 0x6b, 0x54, 0xff),
        text: rgba(0x28, 0x24, 0x1f, 0xff),
        credit: rgba(0x5a, 0x4f, 0x3e, 0xff),
    }
}

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

/// Render one card onto a fresh canvas.
///
/// `extra_keywords` extends the card's own boldable keyword list (both are
/// semicolon-separated).
pub fn render_card(
    card: &CardSpec,
    template: &CardTemplate,
    fonts: &FontSet,
    icons: &IconAssets,
    extra_keywords: Option<&str>,
) -> RgbaImage {
    let palette = palette();
    let mut img = RgbaImage::from_pixel(template.width, template.height, palette.background);

    draw_band(
        &mut img,
        template.title.y,
        TITLE_BAND_HEIGHT,
        template.width,
        palette.band,
    );
    if let Some(slot) = &template.type_line {
        draw_band(&mut img, slot.y, TYPE_BAND_HEIGHT, template.width, palette.band);
    }
    let frame = &template.description_frame;
    draw_filled_rect_mut(
        &mut img,
        Rect::at(
            (frame.center_x - frame.max_width / 2.0) as i32,
            (frame.center_y - frame.max_height / 2.0) as i32,
        )
        .of_size(frame.max_width as u32, frame.max_height as u32),
        palette.panel,
    );
    draw_hollow_rect_mut(
        &mut img,
        Rect::at(0, 0).of_size(template.width, template.height),
        palette.frame,
    );

    let painter = TextPainter::new(fonts, icons);

    let title = card.title.trim_end_matches('*');
    let title_max = if card.preview.is_empty() {
        template.title.max_width
    } else {
        template.title.max_width_previewed
    };
    painter.paint_single_line(
        &mut img,
        title,
        template.title.center_x,
        template.title.y,
        title_max,
        template.title.size,
        palette.text,
    );

    if let Some(slot) = &template.type_line
        && !card.type_line.is_empty()
    {
        let shift = slot.icon_shift * price_icon_count(&card.price).saturating_sub(1) as f32;
        let (center_x, max_width) = if card.price.is_empty() {
            (slot.center_x, slot.max_width)
        } else {
            (slot.priced_center_x + shift, slot.priced_max_width - shift)
        };
        let types: Vec<&str> = card.type_line.split(" - ").collect();
        if types.len() >= 4 {
            // Long type lists split across two rows.
            let half = types.len().div_ceil(2);
            let first = format!("{} -", types[..half].join(" - "));
            let second = types[half..].join(" - ");
            painter.paint_single_line(&mut img, &first, center_x, slot.y - 26.0, max_width, 42.0, palette.text);
            painter.paint_single_line(&mut img, &second, center_x, slot.y + 26.0, max_width, 42.0, palette.text);
        } else {
            painter.paint_single_line(
                &mut img,
                &card.type_line,
                center_x,
                slot.y,
                max_width,
                slot.size,
                palette.text,
            );
        }
    }

    if let Some(slot) = &template.price
        && !card.price.is_empty()
    {
        painter.paint_price_line(&mut img, &card.price, slot.x, slot.y, slot.size, palette.text);
    }

    if let Some(slot) = &template.preview
        && !card.preview.is_empty()
    {
        painter.paint_single_line(&mut img, &card.preview, slot.left_x, slot.y, 0.0, slot.size, palette.text);
        painter.paint_single_line(&mut img, &card.preview, slot.right_x, slot.y, 0.0, slot.size, palette.text);
    }

    if !card.description.trim().is_empty() {
        let mut custom = card.bold_keywords.clone();
        if let Some(extra) = extra_keywords {
            if !custom.is_empty() {
                custom.push(';');
            }
            custom.push_str(extra);
        }
        let opts = LayoutOptions {
            start_size: card.description_size,
            banner_size: template.banner_size,
            keywords: KeywordSet::new(&custom),
        };
        let measurer = FontMeasurer::new(fonts, FontRole::Body);
        let layout = fit_description(&card.description, frame, &opts, &measurer);
        painter.paint_layout(&mut img, &layout, frame, opts.banner_size, palette.text);
    }

    if let Some(slot) = &template.credits {
        painter.paint_credit(
            &mut img,
            &card.illustration_credit,
            slot.left_x,
            slot.y,
            slot.size,
            false,
            palette.credit,
        );
        painter.paint_credit(
            &mut img,
            &card.creator_credit,
            slot.right_x,
            slot.y,
            slot.size,
            true,
            palette.credit,
        );
    }

    img
}

fn draw_band(img: &mut RgbaImage, center_y: f32, height: u32, width: u32, color: Rgba<u8>) {
    let top = (center_y - height as f32 / 2.0).max(0.0) as i32;
    draw_filled_rect_mut(img, Rect::at(0, top).of_size(width, height), color);
}

/// Number of icon tokens the price line will paint; the type line shifts
/// aside to make room for them.
pub fn price_icon_count(price: &str) -> usize {
    price
        .chars()
        .filter(|ch| IconRegistry::price_triggers().any(|trigger| trigger == *ch))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn price_icon_count_ignores_digits_and_the_sun() {
        assert_eq!(price_icon_count("$5"), 1);
        assert_eq!(price_icon_count("$3^"), 2);
        assert_eq!(price_icon_count("*2"), 0);
        assert_eq!(price_icon_count(""), 0);
    }
}
