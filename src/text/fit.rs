//! Shrink-to-fit sizing.
//!
//! Retries the line breaker at descending font sizes until the block fits
//! its frame or the minimum size is reached. Each call derives everything
//! from its inputs; nothing is retained between renders.

use log::{debug, warn};

use crate::text::breaker::{DisplayLine, break_paragraphs};
use crate::text::measure::TextMeasurer;
use crate::text::{LayoutOptions, split_paragraphs};

/// Hard floor for the trial font size. Content still overflowing at the
/// floor is accepted, never an error.
pub const MIN_FONT_SIZE: f32 = 16.0;

/// Step between trial sizes.
pub const FONT_STEP: f32 = 1.0;

/// Target area for a description block, centered on (`center_x`, `center_y`).
#[derive(Debug, Clone, Copy)]
pub struct TextFrame {
    pub center_x: f32,
    pub center_y: f32,
    pub max_width: f32,
    pub max_height: f32,
}

/// A finished layout: the chosen size and its lines, in paint order.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub lines: Vec<DisplayLine>,
    pub font_size: f32,
    pub total_height: f32,
}

/// Lay out raw description text to fit `frame`, shrinking from
/// `opts.start_size` until the block height fits or the floor is hit.
pub fn fit_description(
    text: &str,
    frame: &TextFrame,
    opts: &LayoutOptions,
    measurer: &dyn TextMeasurer,
) -> LayoutResult {
    let paragraphs: Vec<String> = split_paragraphs(text)
        .iter()
        .map(|paragraph| opts.keywords.emphasize(paragraph))
        .collect();
    fit_paragraphs(&paragraphs, frame, opts, measurer)
}

/// Fit pre-emphasized paragraphs. Invokes the breaker at most
/// `⌈(start − floor) / step⌉ + 1` times.
pub fn fit_paragraphs(
    paragraphs: &[String],
    frame: &TextFrame,
    opts: &LayoutOptions,
    measurer: &dyn TextMeasurer,
) -> LayoutResult {
    let mut size = opts.start_size;
    loop {
        let lines = break_paragraphs(paragraphs, frame.max_width, size, opts, measurer);
        let total_height: f32 = lines.iter().map(|line| line.height).sum();
        if total_height <= frame.max_height || size <= MIN_FONT_SIZE {
            if total_height > frame.max_height {
                warn!(
                    "description overflows its frame at the minimum font size \
                     ({total_height:.0}px of {:.0}px)",
                    frame.max_height
                );
            }
            return LayoutResult {
                lines,
                font_size: size,
                total_height,
            };
        }
        debug!("block height {total_height:.0}px exceeds {:.0}px at size {size}", frame.max_height);
        size = (size - FONT_STEP).max(MIN_FONT_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::measure::MonospaceMeasurer;
    use pretty_assertions::assert_eq;

    const M: MonospaceMeasurer = MonospaceMeasurer { advance: 1.0 };

    fn frame(max_width: f32, max_height: f32) -> TextFrame {
        TextFrame {
            center_x: 0.0,
            center_y: 0.0,
            max_width,
            max_height,
        }
    }

    #[test]
    fn generous_frame_keeps_the_start_size() {
        let opts = LayoutOptions::default();
        let result = fit_description("word", &frame(10_000.0, 10_000.0), &opts, &M);
        assert_eq!(result.font_size, opts.start_size);
        assert_eq!(result.lines.len(), 1);
    }

    #[test]
    fn shrinks_until_the_block_fits() {
        let opts = LayoutOptions {
            start_size: 20.0,
            ..Default::default()
        };
        // One line per size trial: height 1.433 * (size + 10). A 44px frame
        // fits once 1.433 * (size + 10) <= 44, i.e. size <= 20.7... at 20
        // already; force shrinking with a lower ceiling instead.
        let result = fit_description("word", &frame(10_000.0, 40.0), &opts, &M);
        assert!(result.font_size < 20.0);
        assert!(result.total_height <= 40.0);
    }

    #[test]
    fn floor_size_is_honored_even_when_content_overflows() {
        let opts = LayoutOptions {
            start_size: 24.0,
            ..Default::default()
        };
        let result = fit_description(
            "many words repeated over and over to guarantee overflow",
            &frame(100.0, 10.0),
            &opts,
            &M,
        );
        assert_eq!(result.font_size, MIN_FONT_SIZE);
        assert!(result.total_height > 10.0);
    }

    #[test]
    fn start_below_the_floor_is_used_as_is() {
        let opts = LayoutOptions {
            start_size: 12.0,
            ..Default::default()
        };
        let result = fit_description("word", &frame(10_000.0, 1.0), &opts, &M);
        assert_eq!(result.font_size, 12.0);
    }

    #[test]
    fn layout_is_reproducible_across_calls() {
        let opts = LayoutOptions::default();
        let text = "Draw two cards.\n+1 Action\n-\nあいうえおかきくけこさしすせそ";
        let f = frame(300.0, 400.0);
        let first = fit_description(text, &f, &opts, &M);
        let second = fit_description(text, &f, &opts, &M);
        assert_eq!(first.font_size, second.font_size);
        assert_eq!(first.total_height, second.total_height);
        assert_eq!(first.lines.len(), second.lines.len());
    }
}
