//! Card template geometry.
//!
//! Each template fixes the canvas size and where the title, type line,
//! price, and description land on it. Coordinates are in canvas pixels.

use anyhow::{Result, anyhow};

use crate::text::TextFrame;

/// A centered single-line slot with a shrink-to-fit start size.
#[derive(Debug, Clone, Copy)]
pub struct TitleSlot {
    pub center_x: f32,
    pub y: f32,
    pub max_width: f32,
    /// Narrower limit when preview glyphs occupy the corners.
    pub max_width_previewed: f32,
    pub size: f32,
}

/// Type-line slot; shifts right and narrows when a price line is present.
#[derive(Debug, Clone, Copy)]
pub struct TypeSlot {
    pub center_x: f32,
    pub y: f32,
    pub max_width: f32,
    pub size: f32,
    pub priced_center_x: f32,
    pub priced_max_width: f32,
    /// Extra displacement per price icon beyond the first.
    pub icon_shift: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct PriceSlot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Corner positions for preview glyphs.
#[derive(Debug, Clone, Copy)]
pub struct PreviewSlot {
    pub left_x: f32,
    pub right_x: f32,
    pub y: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct CreditSlot {
    pub left_x: f32,
    pub right_x: f32,
    pub y: f32,
    pub size: f32,
}

/// Geometry for one card layout.
#[derive(Debug, Clone, Copy)]
pub struct CardTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub width: u32,
    pub height: u32,
    pub title: TitleSlot,
    pub type_line: Option<TypeSlot>,
    pub price: Option<PriceSlot>,
    pub preview: Option<PreviewSlot>,
    pub description_frame: TextFrame,
    pub banner_size: f32,
    pub credits: Option<CreditSlot>,
}

static PORTRAIT: CardTemplate = CardTemplate {
    name: "portrait",
    description: "Standard upright card with type and price bands.",
    width: 1403,
    height: 2151,
    title: TitleSlot {
        center_x: 701.0,
        y: 215.0,
        max_width: 1180.0,
        max_width_previewed: 800.0,
        size: 75.0,
    },
    type_line: Some(TypeSlot {
        center_x: 701.0,
        y: 1922.0,
        max_width: 900.0,
        size: 64.0,
        priced_center_x: 730.0,
        priced_max_width: 800.0,
        icon_shift: 65.0,
    }),
    price: Some(PriceSlot {
        x: 153.0,
        y: 1940.0,
        size: 85.0,
    }),
    preview: Some(PreviewSlot {
        left_x: 223.0,
        right_x: 1203.0,
        y: 210.0,
        size: 85.0,
    }),
    description_frame: TextFrame {
        center_x: 701.0,
        center_y: 1520.0,
        max_width: 960.0,
        max_height: 660.0,
    },
    banner_size: 40.0,
    credits: Some(CreditSlot {
        left_x: 150.0,
        right_x: 1253.0,
        y: 2038.0,
        size: 31.0,
    }),
};

static MAT: CardTemplate = CardTemplate {
    name: "mat",
    description: "Wide player mat with a title banner and a short text box.",
    width: 928,
    height: 684,
    title: TitleSlot {
        center_x: 464.0,
        y: 96.0,
        max_width: 490.0,
        max_width_previewed: 490.0,
        size: 55.0,
    },
    type_line: None,
    price: None,
    preview: None,
    description_frame: TextFrame {
        center_x: 464.0,
        center_y: 572.0,
        max_width: 700.0,
        max_height: 80.0,
    },
    banner_size: 40.0,
    credits: Some(CreditSlot {
        left_x: 15.0,
        right_x: 913.0,
        y: 660.0,
        size: 16.0,
    }),
};

/// Registry of the built-in card templates.
pub struct TemplateRegistry;

impl TemplateRegistry {
    pub fn list() -> Vec<&'static CardTemplate> {
        vec![&PORTRAIT, &MAT]
    }

    /// Resolve a template by name (case-insensitive).
    pub fn get(name: &str) -> Result<&'static CardTemplate> {
        Self::list()
            .into_iter()
            .find(|template| template.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("unknown template '{}'", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_is_case_insensitive() {
        let template = TemplateRegistry::get("Portrait").expect("portrait registered");
        assert_eq!(template.width, 1403);
        assert!(TemplateRegistry::get("landscape").is_err());
    }

    #[test]
    fn every_template_keeps_its_text_frame_inside_the_canvas() {
        for template in TemplateRegistry::list() {
            let frame = &template.description_frame;
            assert!(frame.center_x + frame.max_width / 2.0 <= template.width as f32);
            assert!(frame.center_y + frame.max_height / 2.0 <= template.height as f32);
        }
    }
}
