//! Core library for trading-card layout and rendering.
//!
//! The text engine ([`text`]) turns markup description text into positioned
//! display lines; [`paint`] composes full card faces onto RGBA canvases.
//! Both sides share one measurement primitive so wrapping and painting
//! always agree.

pub mod card;
pub mod fonts;
pub mod icons;
pub mod keywords;
pub mod paint;
pub mod templates;
pub mod text;

pub use card::{CardSet, CardSpec, SetHeader};
pub use fonts::{FontError, FontRole, FontSet};
pub use icons::{IconAssets, IconDef, IconRegistry};
pub use keywords::KeywordSet;
pub use paint::{TextPainter, render_card};
pub use templates::{CardTemplate, TemplateRegistry};
pub use text::{DisplayLine, LayoutOptions, LayoutResult, TextFrame, fit_description};

use anyhow::Result;
use image::RgbaImage;

/// Render a card definition with its own template selection.
pub fn render_card_image(
    card: &CardSpec,
    fonts: &FontSet,
    icons: &IconAssets,
    extra_keywords: Option<&str>,
) -> Result<RgbaImage> {
    let template = TemplateRegistry::get(&card.template)?;
    Ok(render_card(card, template, fonts, icons, extra_keywords))
}
