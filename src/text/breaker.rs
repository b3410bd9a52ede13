//! Greedy line breaking.
//!
//! Consumes emphasized paragraph text and produces [`DisplayLine`]s whose
//! accumulated widths respect the target width. Latin text packs word by
//! word; dense scripts pack character by character under the no-break rules
//! below. Style runs are closed at every break and reopened on the next line
//! so each line is independently balanced.

use crate::text::measure::{TextMeasurer, icon_width};
use crate::text::token::{MarkupToken, StyleKind, StyleState, classify_word};
use crate::text::LayoutOptions;

pub const LINE_PAD: f32 = 10.0;
pub const LINE_FACTOR: f32 = 1.433;
const BLANK_FACTOR: f32 = 0.5;
const RULE_FACTOR: f32 = 1.1;

/// Height reserved for a standalone icon banner line, and the bold size its
/// glyphs are measured and painted at.
pub const ICON_BANNER_HEIGHT: f32 = 275.0;
pub const ICON_BANNER_SIZE: f32 = 192.0;

/// Characters that must never become the first glyph of a wrapped line.
const NO_BREAK_BEFORE: &[char] = &[
    '、', '。', ',', '.', '！', '？', '!', '?', '）', '」', '】', '』', ')', 'ー', 'っ', 'ゃ',
    'ゅ', 'ょ', 'ッ', 'ャ', 'ュ', 'ョ',
];

/// Opening characters that stay attached to the glyph that follows them.
const KEEP_WITH_NEXT: &[char] = &['（', '「', '【', '『', '(', '+', '-'];

const NBSP: char = '\u{a0}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Text,
    /// Vertical spacing only.
    Blank,
    /// Horizontal divider.
    Rule,
}

/// Enlarged centered stat lines such as `+1 Action` or a lone cost icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Plus,
    Icon,
}

/// One finished, width-bounded line of output.
#[derive(Debug, Clone)]
pub struct DisplayLine {
    pub tokens: Vec<MarkupToken>,
    pub width: f32,
    pub height: f32,
    pub centered: bool,
    pub kind: LineKind,
    pub banner: Option<Banner>,
}

impl DisplayLine {
    fn spacer(kind: LineKind, height: f32) -> Self {
        Self {
            tokens: Vec::new(),
            width: 0.0,
            height,
            centered: false,
            kind,
            banner: None,
        }
    }

    /// Whether every style opened on this line is closed on it, and no close
    /// appears without its open.
    pub fn is_style_balanced(&self) -> bool {
        let mut open = StyleState::default();
        for token in &self.tokens {
            match token {
                MarkupToken::StyleStart(kind) => {
                    if open.get(*kind) {
                        return false;
                    }
                    open.set(*kind, true);
                }
                MarkupToken::StyleEnd(kind) => {
                    if !open.get(*kind) {
                        return false;
                    }
                    open.set(*kind, false);
                }
                _ => {}
            }
        }
        open == StyleState::default()
    }

    /// Concatenated visible text, for assertions and diagnostics.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                MarkupToken::Word(text) => out.push_str(text),
                MarkupToken::Icon(icon) => {
                    if let Some(sign) = icon.sign {
                        out.push(sign);
                    }
                    out.push(icon.key);
                    out.push_str(&icon.amount);
                }
                _ => {}
            }
        }
        out
    }
}

/// Break every paragraph against `max_width` at the trial font size.
pub fn break_paragraphs(
    paragraphs: &[String],
    max_width: f32,
    size: f32,
    opts: &LayoutOptions,
    measurer: &dyn TextMeasurer,
) -> Vec<DisplayLine> {
    let mut lines = Vec::new();
    for paragraph in paragraphs {
        break_paragraph(paragraph, max_width, size, opts, measurer, &mut lines);
    }
    lines
}

fn break_paragraph(
    paragraph: &str,
    max_width: f32,
    size: f32,
    opts: &LayoutOptions,
    measurer: &dyn TextMeasurer,
    out: &mut Vec<DisplayLine>,
) {
    let trimmed = paragraph.trim();
    if trimmed.is_empty() {
        out.push(DisplayLine::spacer(
            LineKind::Blank,
            BLANK_FACTOR * (size + LINE_PAD),
        ));
        return;
    }
    if trimmed == "-" {
        out.push(DisplayLine::spacer(
            LineKind::Rule,
            RULE_FACTOR * (size + LINE_PAD),
        ));
        return;
    }

    let blocks: Vec<&str> = trimmed.split(' ').filter(|block| !block.is_empty()).collect();
    let classified: Vec<Vec<MarkupToken>> = blocks.iter().map(|block| classify_word(block)).collect();

    if let Some(line) = banner_line(&blocks, &classified, size, opts, measurer) {
        out.push(line);
        return;
    }

    let mut builder = LineBuilder::new(measurer, max_width, size, out);
    for block in &classified {
        builder.add_block(block);
    }
    builder.finish_paragraph();
}

/// A paragraph whose only content block is an emphasized keyword phrase or a
/// lone icon token becomes a centered banner line.
fn banner_line(
    blocks: &[&str],
    classified: &[Vec<MarkupToken>],
    size: f32,
    opts: &LayoutOptions,
    measurer: &dyn TextMeasurer,
) -> Option<DisplayLine> {
    let mut content = classified
        .iter()
        .enumerate()
        .filter(|(_, tokens)| tokens.iter().any(|token| !token.is_marker()));
    let (index, tokens) = content.next()?;
    if content.next().is_some() {
        return None;
    }

    let block = blocks[index];
    let lone_icon = matches!(tokens.as_slice(), [MarkupToken::Icon(_)]);
    if !lone_icon && !opts.keywords.matches_block(block) {
        return None;
    }

    let mut line_tokens = vec![MarkupToken::StyleStart(StyleKind::Bold)];
    line_tokens.extend(tokens.iter().cloned());
    line_tokens.push(MarkupToken::StyleEnd(StyleKind::Bold));

    let (width, height, banner) = if block.starts_with('+') {
        (
            tokens_width(&line_tokens, opts.banner_size, measurer),
            LINE_FACTOR * (opts.banner_size + 2.0 * LINE_PAD),
            Some(Banner::Plus),
        )
    } else if lone_icon {
        (
            tokens_width(&line_tokens, ICON_BANNER_SIZE, measurer),
            ICON_BANNER_HEIGHT,
            Some(Banner::Icon),
        )
    } else {
        (
            tokens_width(&line_tokens, size, measurer),
            LINE_FACTOR * (size + LINE_PAD),
            None,
        )
    };

    Some(DisplayLine {
        tokens: line_tokens,
        width,
        height,
        centered: true,
        kind: LineKind::Text,
        banner,
    })
}

/// Width of a token sequence with the style evolving over its own markers.
pub fn tokens_width(tokens: &[MarkupToken], size: f32, measurer: &dyn TextMeasurer) -> f32 {
    let mut style = StyleState::default();
    let mut width = 0.0;
    for token in tokens {
        match token {
            MarkupToken::StyleStart(kind) => style.set(*kind, true),
            MarkupToken::StyleEnd(kind) => style.set(*kind, false),
            MarkupToken::Word(text) => width += measurer.width(text, style, size),
            MarkupToken::Icon(icon) => width += icon_width(icon, style, size, measurer),
        }
    }
    width
}

struct LineBuilder<'a> {
    measurer: &'a dyn TextMeasurer,
    max_width: f32,
    size: f32,
    out: &'a mut Vec<DisplayLine>,
    tokens: Vec<MarkupToken>,
    run: String,
    width: f32,
    style: StyleState,
    active: Vec<StyleKind>,
    centered: bool,
    /// Height the paragraph's final line will receive; a word wrap tightens
    /// it until the next block resets it.
    final_height: f32,
}

impl<'a> LineBuilder<'a> {
    fn new(
        measurer: &'a dyn TextMeasurer,
        max_width: f32,
        size: f32,
        out: &'a mut Vec<DisplayLine>,
    ) -> Self {
        Self {
            measurer,
            max_width,
            size,
            out,
            tokens: Vec::new(),
            run: String::new(),
            width: 0.0,
            style: StyleState::default(),
            active: Vec::new(),
            centered: false,
            final_height: LINE_FACTOR * (size + LINE_PAD),
        }
    }

    fn normal_height(&self) -> f32 {
        LINE_FACTOR * (self.size + LINE_PAD)
    }

    fn tight_height(&self) -> f32 {
        LINE_FACTOR * self.size
    }

    fn line_is_empty(&self) -> bool {
        self.run.is_empty() && !self.tokens.iter().any(|token| !token.is_marker())
    }

    fn add_block(&mut self, block: &[MarkupToken]) {
        if block.iter().all(MarkupToken::is_marker) {
            for token in block {
                self.apply_marker(token);
            }
            return;
        }
        self.final_height = self.normal_height();
        if is_ascii_block(block) {
            self.add_ascii_block(block);
        } else {
            self.add_dense_block(block);
        }
    }

    /// Word-granularity packing for Latin text; joins with a no-break space
    /// so keyword bindings survive as one paint run. Latin lines render
    /// centered.
    fn add_ascii_block(&mut self, block: &[MarkupToken]) {
        let mut probe = self.style;
        let mut block_width = 0.0;
        for token in block {
            match token {
                MarkupToken::StyleStart(kind) => probe.set(*kind, true),
                MarkupToken::StyleEnd(kind) => probe.set(*kind, false),
                MarkupToken::Word(text) => {
                    block_width += self.measurer.width(text, probe, self.size)
                }
                MarkupToken::Icon(_) => {}
            }
        }

        let space_width = self.measurer.width(" ", self.style, self.size);
        if !self.line_is_empty() {
            if self.width + block_width + space_width > self.max_width {
                self.finish_line(self.tight_height(), None);
                self.final_height = self.tight_height();
            } else {
                self.run.push(NBSP);
                self.width += space_width;
            }
        }

        for token in block {
            match token {
                MarkupToken::Word(text) => {
                    self.width += self.measurer.width(text, self.style, self.size);
                    self.run.push_str(text);
                }
                marker => self.apply_marker(marker),
            }
        }
        self.centered = true;
    }

    /// Character-granularity packing for dense scripts and icon-bearing
    /// blocks, honoring the no-break and keep-with-next sets.
    fn add_dense_block(&mut self, block: &[MarkupToken]) {
        if !self.line_is_empty() {
            self.run.push(' ');
            self.width += self.measurer.width(" ", self.style, self.size);
        }
        for token in block {
            match token {
                MarkupToken::Icon(icon) => {
                    let width = icon_width(icon, self.style, self.size, self.measurer);
                    if self.width + width > self.max_width && !self.line_is_empty() {
                        self.wrap();
                    }
                    self.flush_run();
                    self.tokens.push(MarkupToken::Icon(icon.clone()));
                    self.width += width;
                }
                MarkupToken::Word(text) => {
                    for ch in text.chars() {
                        let mut buf = [0u8; 4];
                        let glyph = ch.encode_utf8(&mut buf);
                        let width = self.measurer.width(glyph, self.style, self.size);
                        if !NO_BREAK_BEFORE.contains(&ch)
                            && self.width + width > self.max_width
                            && !self.line_is_empty()
                        {
                            self.wrap();
                        }
                        self.run.push(ch);
                        self.width += width;
                    }
                }
                marker => self.apply_marker(marker),
            }
        }
    }

    fn apply_marker(&mut self, token: &MarkupToken) {
        match token {
            MarkupToken::StyleStart(kind) => {
                // Same-kind nesting just continues the open run.
                if !self.style.get(*kind) {
                    self.flush_run();
                    self.tokens.push(MarkupToken::StyleStart(*kind));
                    self.style.set(*kind, true);
                    self.active.push(*kind);
                }
            }
            MarkupToken::StyleEnd(kind) => {
                // A stray close without an open is dropped.
                if self.style.get(*kind) {
                    self.flush_run();
                    self.tokens.push(MarkupToken::StyleEnd(*kind));
                    self.style.set(*kind, false);
                    self.active.retain(|active| active != kind);
                }
            }
            _ => {}
        }
    }

    fn flush_run(&mut self) {
        if !self.run.is_empty() {
            self.tokens
                .push(MarkupToken::Word(std::mem::take(&mut self.run)));
        }
    }

    /// Break before the glyph about to be placed, moving a trailing opener
    /// onto the new line with it.
    fn wrap(&mut self) {
        let carried = self
            .run
            .chars()
            .last()
            .filter(|ch| KEEP_WITH_NEXT.contains(ch));
        if let Some(ch) = carried {
            self.run.pop();
            let mut buf = [0u8; 4];
            self.width -= self
                .measurer
                .width(ch.encode_utf8(&mut buf), self.style, self.size);
        }
        self.finish_line(self.normal_height(), carried);
    }

    fn finish_line(&mut self, height: f32, carried: Option<char>) {
        self.flush_run();
        for kind in self.active.iter().rev() {
            self.tokens.push(MarkupToken::StyleEnd(*kind));
        }
        strip_empty_style_pairs(&mut self.tokens);

        let tokens = std::mem::take(&mut self.tokens);
        if tokens.iter().any(|token| !token.is_marker()) {
            self.out.push(DisplayLine {
                tokens,
                width: self.width,
                height,
                centered: self.centered,
                kind: LineKind::Text,
                banner: None,
            });
        }
        self.width = 0.0;

        // Reopen the runs that are still active, then restore the carried
        // opener as the first glyph of the new line.
        for kind in &self.active {
            self.tokens.push(MarkupToken::StyleStart(*kind));
        }
        if let Some(ch) = carried {
            let mut buf = [0u8; 4];
            self.width += self
                .measurer
                .width(ch.encode_utf8(&mut buf), self.style, self.size);
            self.run.push(ch);
        }
    }

    fn finish_paragraph(&mut self) {
        let height = self.final_height;
        self.finish_line(height, None);
    }
}

fn is_ascii_block(block: &[MarkupToken]) -> bool {
    block.iter().all(|token| match token {
        MarkupToken::Word(text) => text
            .chars()
            .all(|ch| (' '..='~').contains(&ch) || ch == NBSP),
        MarkupToken::Icon(_) => false,
        _ => true,
    })
}

/// Drop adjacent open/close pairs with nothing between them, left behind
/// when a style marker lands at the very end of a line.
fn strip_empty_style_pairs(tokens: &mut Vec<MarkupToken>) {
    loop {
        let len = tokens.len();
        if len < 2 {
            return;
        }
        let matched = matches!(
            (&tokens[len - 2], &tokens[len - 1]),
            (MarkupToken::StyleStart(open), MarkupToken::StyleEnd(close)) if open == close
        );
        if !matched {
            return;
        }
        tokens.truncate(len - 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::measure::MonospaceMeasurer;
    use pretty_assertions::assert_eq;

    const M: MonospaceMeasurer = MonospaceMeasurer { advance: 1.0 };

    fn break_one(paragraph: &str, max_width: f32, size: f32) -> Vec<DisplayLine> {
        let opts = LayoutOptions::default();
        break_paragraphs(&[paragraph.to_string()], max_width, size, &opts, &M)
    }

    #[test]
    fn blank_paragraph_is_a_spacer() {
        let lines = break_one("   ", 100.0, 10.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::Blank);
        assert_eq!(lines[0].height, 10.0);
        assert!(lines[0].tokens.is_empty());
    }

    #[test]
    fn lone_dash_is_a_rule() {
        let lines = break_one("-", 100.0, 10.0);
        assert_eq!(lines[0].kind, LineKind::Rule);
        assert_eq!(lines[0].height, 22.0);
    }

    #[test]
    fn emphasized_keyword_alone_becomes_a_plus_banner() {
        let opts = LayoutOptions::default();
        let paragraph = opts.keywords.emphasize("+1 Action");
        let lines = break_paragraphs(&[paragraph], 900.0, 10.0, &opts, &M);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.centered);
        assert_eq!(line.banner, Some(Banner::Plus));
        assert_eq!(line.height, LINE_FACTOR * (opts.banner_size + 20.0));
        assert_eq!(line.tokens[0], MarkupToken::StyleStart(StyleKind::Bold));
        assert_eq!(line.visible_text(), "+1\u{a0}Action");
        assert!(line.is_style_balanced());
    }

    #[test]
    fn lone_icon_becomes_an_icon_banner() {
        let lines = break_one("$4", 900.0, 10.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].banner, Some(Banner::Icon));
        assert_eq!(lines[0].height, ICON_BANNER_HEIGHT);
        assert!(lines[0].centered);
    }

    #[test]
    fn ascii_words_pack_greedily_and_stay_within_width() {
        // 10px per char at size 10; 100px line fits "aaaa bbbb" (90px).
        let lines = break_one("aaaa bbbb cccc", 100.0, 10.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].visible_text(), "aaaa\u{a0}bbbb");
        assert_eq!(lines[1].visible_text(), "cccc");
        assert!(lines.iter().all(|line| line.width <= 100.0));
        // A word wrap tightens the line height for the rest of the paragraph.
        assert_eq!(lines[0].height, LINE_FACTOR * 10.0);
        assert_eq!(lines[1].height, LINE_FACTOR * 10.0);
        assert!(lines.iter().all(|line| line.centered));
    }

    #[test]
    fn style_runs_close_and_reopen_across_breaks() {
        let lines = break_one("[b]aaaa bbbb[/b]", 50.0, 10.0);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.is_style_balanced(), "unbalanced line: {:?}", line.tokens);
        }
        assert_eq!(
            lines[1].tokens,
            vec![
                MarkupToken::StyleStart(StyleKind::Bold),
                MarkupToken::Word("bbbb".to_string()),
                MarkupToken::StyleEnd(StyleKind::Bold),
            ]
        );
    }

    #[test]
    fn dense_script_breaks_between_characters() {
        let lines = break_one("あいうえおかきくけこ", 40.0, 10.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].visible_text(), "あいうえ");
        assert_eq!(lines[1].visible_text(), "おかきく");
        assert_eq!(lines[2].visible_text(), "けこ");
        assert!(lines.iter().all(|line| !line.centered));
    }

    #[test]
    fn closing_punctuation_never_starts_a_line() {
        let lines = break_one("あいうえ。かき", 40.0, 10.0);
        assert_eq!(lines[0].visible_text(), "あいうえ。");
        assert_eq!(lines[1].visible_text(), "かき");
        for line in &lines[1..] {
            let first = line.visible_text().chars().next();
            assert!(first.is_none_or(|ch| !super::NO_BREAK_BEFORE.contains(&ch)));
        }
    }

    #[test]
    fn opening_bracket_moves_to_the_next_line() {
        let lines = break_one("ああああ（いい", 50.0, 10.0);
        assert_eq!(lines[0].visible_text(), "ああああ");
        assert_eq!(lines[1].visible_text(), "（いい");
    }

    #[test]
    fn oversized_glyph_is_placed_anyway() {
        let lines = break_one("あ", 5.0, 10.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].visible_text(), "あ");
        assert!(lines[0].width > 5.0);
    }

    #[test]
    fn icon_in_dense_text_is_atomic() {
        // Icon slot is 3 chars = 30px; each kana 10px.
        let lines = break_one("あい$2を得る", 55.0, 10.0);
        assert_eq!(lines.len(), 2);
        assert!(matches!(lines[0].tokens.last(), Some(MarkupToken::Icon(_))));
        assert_eq!(lines[1].visible_text(), "を得る");
    }

    #[test]
    fn unmatched_style_extends_to_paragraph_end() {
        let lines = break_one("[i]aaaa bbbb", 200.0, 10.0);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_style_balanced());
        assert_eq!(
            lines[0].tokens.last(),
            Some(&MarkupToken::StyleEnd(StyleKind::Italic))
        );
    }

    #[test]
    fn italic_join_inside_run_uses_a_no_break_space() {
        let lines = break_one(
            "Gain a Silver. [i]Heirloom: [/i]return this to the Supply.",
            10_000.0,
            10.0,
        );
        assert_eq!(lines.len(), 1);
        let tokens = &lines[0].tokens;
        // Plain run, italic run holding "Heirloom:\u{a0}", then plain again.
        let italic_at = tokens
            .iter()
            .position(|token| token == &MarkupToken::StyleStart(StyleKind::Italic))
            .expect("italic run present");
        assert_eq!(
            tokens[italic_at + 1],
            MarkupToken::Word("Heirloom:\u{a0}".to_string())
        );
        assert_eq!(
            tokens[italic_at + 2],
            MarkupToken::StyleEnd(StyleKind::Italic)
        );
        assert!(lines[0].is_style_balanced());
    }
}
