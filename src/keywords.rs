//! Keyword emphasis pass.
//!
//! Card text conventionally bolds benefit phrases such as `+1 Action` or
//! `+2 Cards`. This pass wraps recognised phrases in explicit `[b]`/`[/b]`
//! markers before tokenization, binding a numeric prefix to its phrase with
//! a no-break space so the pair survives line wrapping as one block.

use regex::Regex;

/// Boldable phrases, matched case-insensitively with an optional plural `s`.
static BOLDABLE_KEYWORDS: &[&str] = &[
    "cards",
    "card",
    "カードを引く",
    "buys",
    "buy",
    "カードを購入",
    "購入",
    "actions",
    "action",
    "アクション",
    "coffers",
    "coffer",
    "財源",
    "villagers",
    "villager",
    "村人",
    "好意",
    "aktion",
    "aktionen",
    "karte",
    "karten",
    "kauf",
    "käufe",
    "dorfbewohner",
    "münze",
    "münzen",
];

/// Phrases that may also follow a bare number, or stand alone.
static SPECIAL_KEYWORDS: &[&str] = &["favor", "gefallen"];

const NBSP: char = '\u{a0}';

/// Compiled emphasis patterns for the base list plus user additions.
pub struct KeywordSet {
    base: Regex,
    base_anchored: Regex,
    special: Regex,
    special_anchored: Regex,
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::new("")
    }
}

impl KeywordSet {
    /// Build the set from the built-in lists plus `custom`, a
    /// semicolon-separated list of extra phrases. Empty entries are dropped;
    /// a custom list the pattern engine rejects falls back to the built-in
    /// list rather than failing the render.
    pub fn new(custom: &str) -> Self {
        let customs: Vec<String> = custom
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| regex::escape(entry))
            .collect();
        match Self::build(&customs) {
            Ok(set) => set,
            Err(err) => {
                log::warn!("custom keyword list rejected ({err}); using the built-in list");
                Self::build(&[]).expect("built-in keyword patterns compile")
            }
        }
    }

    fn build(customs: &[String]) -> Result<Self, regex::Error> {
        let mut words: Vec<String> = BOLDABLE_KEYWORDS
            .iter()
            .map(|word| regex::escape(word))
            .collect();
        words.extend(customs.iter().cloned());

        let base_body = format!(r"(?:([-+]\d+)\s+|(\+))((?:{})s?)", words.join("|"));
        let special_body = format!(
            r"(?:([-+]\d+)\s+|(\d+)\s+|(\+))?((?:{})s?)",
            SPECIAL_KEYWORDS.join("|")
        );

        Ok(Self {
            base: Regex::new(&format!("(?i){base_body}"))?,
            base_anchored: Regex::new(&format!("(?i)^{base_body}$"))?,
            special: Regex::new(&format!("(?i){special_body}"))?,
            special_anchored: Regex::new(&format!("(?i)^{special_body}$"))?,
        })
    }

    /// Wrap keyword phrases in `[b]`/`[/b]`, leaving existing bold regions
    /// untouched. Running the pass twice yields the same text as once.
    pub fn emphasize(&self, paragraph: &str) -> String {
        apply_outside_bold(paragraph, &|segment| {
            let first = self
                .base
                .replace_all(segment, |caps: &regex::Captures<'_>| {
                    let keyword = &caps[3];
                    match caps.get(1) {
                        Some(number) => {
                            format!(" [b] {}{NBSP}{keyword} [/b] ", number.as_str())
                        }
                        None => format!(" [b] +{keyword} [/b] "),
                    }
                })
                .into_owned();
            apply_outside_bold(&first, &|inner| {
                self.special
                    .replace_all(inner, |caps: &regex::Captures<'_>| {
                        let keyword = &caps[4];
                        let prefix = caps
                            .get(1)
                            .or_else(|| caps.get(2))
                            .map(|number| format!("{}{NBSP}", number.as_str()))
                            .unwrap_or_else(|| {
                                if caps.get(3).is_some() {
                                    "+".to_string()
                                } else {
                                    String::new()
                                }
                            });
                        format!(" [b] {prefix}{keyword} [/b] ")
                    })
                    .into_owned()
            })
        })
    }

    /// Whether a single whitespace-delimited block is exactly an emphasized
    /// phrase (used to detect centered banner lines such as `+1 Action`).
    pub fn matches_block(&self, block: &str) -> bool {
        self.base_anchored.is_match(block) || self.special_anchored.is_match(block)
    }
}

/// Apply `f` to the stretches of `text` outside `[b]...[/b]` regions.
/// An unmatched `[b]` extends its region to the end of the text.
fn apply_outside_bold(text: &str, f: &dyn Fn(&str) -> String) -> String {
    let mut out = String::new();
    let mut rest = text;
    while let Some(start) = rest.find("[b]") {
        out.push_str(&f(&rest[..start]));
        let bold = &rest[start..];
        match bold.find("[/b]") {
            Some(end) => {
                out.push_str(&bold[..end + 4]);
                rest = &bold[end + 4..];
            }
            None => {
                out.push_str(bold);
                return out;
            }
        }
    }
    out.push_str(&f(rest));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blocks(text: &str) -> Vec<&str> {
        text.split(' ').filter(|block| !block.is_empty()).collect()
    }

    #[test]
    fn binds_number_to_keyword_with_nbsp() {
        let set = KeywordSet::default();
        let out = set.emphasize("+1 Action");
        assert_eq!(blocks(&out), vec!["[b]", "+1\u{a0}Action", "[/b]"]);
    }

    #[test]
    fn sign_only_prefix_attaches_without_gap() {
        let set = KeywordSet::default();
        let out = set.emphasize("+Buy");
        assert_eq!(blocks(&out), vec!["[b]", "+Buy", "[/b]"]);
    }

    #[test]
    fn emphasis_is_idempotent() {
        let set = KeywordSet::default();
        let once = set.emphasize("Draw until you have 7 cards. +1 Buy");
        let twice = set.emphasize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn explicit_bold_regions_are_left_alone() {
        let set = KeywordSet::default();
        let input = "[b] +1 Action [/b] and more";
        assert_eq!(set.emphasize(input), input);
    }

    #[test]
    fn matching_is_case_insensitive_and_plural_aware() {
        let set = KeywordSet::default();
        let out = set.emphasize("+2 CARDS");
        assert_eq!(blocks(&out), vec!["[b]", "+2\u{a0}CARDS", "[/b]"]);
        let plural = set.emphasize("+1 Coffers");
        assert_eq!(blocks(&plural), vec!["[b]", "+1\u{a0}Coffers", "[/b]"]);
    }

    #[test]
    fn special_keywords_accept_a_bare_number() {
        let set = KeywordSet::default();
        let out = set.emphasize("Gain 2 Favors now");
        assert_eq!(
            blocks(&out),
            vec!["Gain", "[b]", "2\u{a0}Favors", "[/b]", "now"]
        );
    }

    #[test]
    fn empty_custom_entries_are_dropped() {
        let set = KeywordSet::new(";;Embargo;  ;");
        let out = set.emphasize("+1 Embargo");
        assert_eq!(blocks(&out), vec!["[b]", "+1\u{a0}Embargo", "[/b]"]);
    }

    #[test]
    fn block_matching_sees_through_the_nbsp_binding() {
        let set = KeywordSet::default();
        assert!(set.matches_block("+1\u{a0}Action"));
        assert!(set.matches_block("favor"));
        assert!(!set.matches_block("Silver"));
        assert!(!set.matches_block("Action"));
    }
}
