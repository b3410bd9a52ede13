//! Painting: card face composition and glyph rendering.

mod face;
mod text;

pub use face::{price_icon_count, render_card};
pub use text::TextPainter;
