//! Markup token classification.
//!
//! Card text mixes plain words with bracket style markers (`[b]`, `[/i]`, ...)
//! and inline icon tokens (`$3`, `+2@`, `^`). A single forward scan turns one
//! whitespace-delimited word into its token sequence, splitting out icons and
//! markers glued to surrounding text (`($2)`, `[i]Heirloom:`) while keeping
//! the attached fragments as separate plain words.

use crate::icons::IconRegistry;

/// One of the three inline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Bold,
    Italic,
    Underline,
}

/// Active style flags while measuring or painting a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyleState {
    pub fn get(self, kind: StyleKind) -> bool {
        match kind {
            StyleKind::Bold => self.bold,
            StyleKind::Italic => self.italic,
            StyleKind::Underline => self.underline,
        }
    }

    pub fn set(&mut self, kind: StyleKind, on: bool) {
        match kind {
            StyleKind::Bold => self.bold = on,
            StyleKind::Italic => self.italic = on,
            StyleKind::Underline => self.underline = on,
        }
    }

    /// The same state with bold forced on (signs and badges paint bold).
    pub fn bolded(self) -> Self {
        Self { bold: true, ..self }
    }
}

/// Inline icon reference: optional sign, trigger character, numeric suffix.
/// The suffix may contain `?` placeholders and end in a `*`, `+`, or `-`
/// cost marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconToken {
    pub sign: Option<char>,
    pub key: char,
    pub amount: String,
}

/// The atomic unit of classified card text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    Word(String),
    StyleStart(StyleKind),
    StyleEnd(StyleKind),
    Icon(IconToken),
}

impl MarkupToken {
    /// Style markers occupy no width and carry no glyphs.
    pub fn is_marker(&self) -> bool {
        matches!(self, MarkupToken::StyleStart(_) | MarkupToken::StyleEnd(_))
    }
}

const MARKERS: &[(&str, StyleKind, bool)] = &[
    ("[b]", StyleKind::Bold, true),
    ("[/b]", StyleKind::Bold, false),
    ("[i]", StyleKind::Italic, true),
    ("[/i]", StyleKind::Italic, false),
    ("[u]", StyleKind::Underline, true),
    ("[/u]", StyleKind::Underline, false),
];

/// Classify one whitespace-delimited word into markup tokens.
pub fn classify_word(word: &str) -> Vec<MarkupToken> {
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut rest = word;

    while !rest.is_empty() {
        if let Some((token, len)) = match_marker(rest) {
            flush(&mut buf, &mut tokens);
            tokens.push(token);
            rest = &rest[len..];
            continue;
        }
        if let Some((icon, len)) = match_icon(rest) {
            flush(&mut buf, &mut tokens);
            tokens.push(MarkupToken::Icon(icon));
            rest = &rest[len..];
            continue;
        }
        let Some(ch) = rest.chars().next() else { break };
        buf.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    flush(&mut buf, &mut tokens);
    tokens
}

fn flush(buf: &mut String, tokens: &mut Vec<MarkupToken>) {
    if !buf.is_empty() {
        tokens.push(MarkupToken::Word(std::mem::take(buf)));
    }
}

fn match_marker(rest: &str) -> Option<(MarkupToken, usize)> {
    for &(tag, kind, is_start) in MARKERS {
        if rest.starts_with(tag) {
            let token = if is_start {
                MarkupToken::StyleStart(kind)
            } else {
                MarkupToken::StyleEnd(kind)
            };
            return Some((token, tag.len()));
        }
    }
    None
}

/// Try to read an icon token at the head of `rest`. The grammar is
/// `[-+]? trigger [0-9?]* [-+*]?`; a sign only attaches when it directly
/// precedes a registered trigger character.
fn match_icon(rest: &str) -> Option<(IconToken, usize)> {
    let mut chars = rest.chars();
    let first = chars.next()?;

    let (sign, key, mut consumed) = if first == '+' || first == '-' {
        let second = chars.next()?;
        if !IconRegistry::is_trigger(second) {
            return None;
        }
        (Some(first), second, first.len_utf8() + second.len_utf8())
    } else if IconRegistry::is_trigger(first) {
        (None, first, first.len_utf8())
    } else {
        return None;
    };

    let mut amount = String::new();
    for ch in rest[consumed..].chars() {
        if ch.is_ascii_digit() || ch == '?' {
            amount.push(ch);
            consumed += ch.len_utf8();
        } else {
            break;
        }
    }
    if let Some(ch) = rest[consumed..].chars().next()
        && matches!(ch, '*' | '+' | '-')
    {
        amount.push(ch);
        consumed += ch.len_utf8();
    }

    Some((IconToken { sign, key, amount }, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn word(text: &str) -> MarkupToken {
        MarkupToken::Word(text.to_string())
    }

    fn icon(sign: Option<char>, key: char, amount: &str) -> MarkupToken {
        MarkupToken::Icon(IconToken {
            sign,
            key,
            amount: amount.to_string(),
        })
    }

    #[test]
    fn plain_words_stay_whole() {
        assert_eq!(classify_word("Silver."), vec![word("Silver.")]);
    }

    #[test]
    fn style_markers_are_exact_tokens() {
        assert_eq!(
            classify_word("[b]"),
            vec![MarkupToken::StyleStart(StyleKind::Bold)]
        );
        assert_eq!(
            classify_word("[/u]"),
            vec![MarkupToken::StyleEnd(StyleKind::Underline)]
        );
    }

    #[test]
    fn glued_marker_splits_from_its_word() {
        assert_eq!(
            classify_word("[i]Heirloom:"),
            vec![MarkupToken::StyleStart(StyleKind::Italic), word("Heirloom:")]
        );
    }

    #[test]
    fn icon_with_sign_and_cost_markers() {
        assert_eq!(classify_word("+$2"), vec![icon(Some('+'), '$', "2")]);
        assert_eq!(classify_word("$3*"), vec![icon(None, '$', "3*")]);
        assert_eq!(classify_word("@4+"), vec![icon(None, '@', "4+")]);
        assert_eq!(classify_word("$?"), vec![icon(None, '$', "?")]);
    }

    #[test]
    fn glued_punctuation_becomes_separate_fragments() {
        assert_eq!(
            classify_word("($2)."),
            vec![word("("), icon(None, '$', "2"), word(").")]
        );
        assert_eq!(
            classify_word("「$2」"),
            vec![word("「"), icon(None, '$', "2"), word("」")]
        );
    }

    #[test]
    fn unregistered_trigger_is_plain_text() {
        assert_eq!(classify_word("&1"), vec![word("&1")]);
        assert_eq!(classify_word("-1"), vec![word("-1")]);
    }

    #[test]
    fn sign_without_trigger_is_plain_text() {
        assert_eq!(classify_word("+1"), vec![word("+1")]);
    }
}
