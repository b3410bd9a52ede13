//! Inline icon registry.
//!
//! Maps a single trigger character appearing in card text (e.g. `$3`, `+2@`)
//! to the icon drawn in its place. Definitions are fixed at startup; image
//! assets are resolved separately and may legitimately be absent.

use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;

/// Broad grouping used when listing icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconCategory {
    Treasure,
    Victory,
}

/// Fill color for the numeric badge painted over an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    White,
    Black,
}

/// Static registry entry for one inline icon.
#[derive(Debug, Clone)]
pub struct IconDef {
    /// Character that triggers icon substitution in card text.
    pub trigger: char,
    /// Image asset stem; the bitmap is looked up as `<asset>.png`.
    pub asset: &'static str,
    pub badge_color: BadgeColor,
    pub category: IconCategory,
    /// Localized display label.
    pub label: &'static str,
}

macro_rules! icon {
    ($trigger:expr, $asset:expr, $badge:ident, $category:ident, $label:expr) => {
        IconDef {
            trigger: $trigger,
            asset: $asset,
            badge_color: BadgeColor::$badge,
            category: IconCategory::$category,
            label: $label,
        }
    };
}

static ICONS: &[IconDef] = &[
    icon!('@', "Debt", White, Treasure, "負債"),
    icon!('^', "Potion", White, Treasure, "ポーション"),
    icon!('%', "VP", White, Victory, "勝利点"),
    icon!('#', "VP-Token", White, Victory, "勝利点トークン"),
    icon!('$', "Coin", Black, Treasure, "コイン"),
    icon!('*', "Sun", Black, Treasure, "太陽"),
    icon!('§', "Custom", White, Treasure, "カスタムアイコン"),
];

/// Registry of the icon triggers recognised in card text.
pub struct IconRegistry;

impl IconRegistry {
    /// All registered icons, in listing order.
    pub fn list() -> &'static [IconDef] {
        ICONS
    }

    /// Resolve a trigger character to its definition.
    pub fn get(trigger: char) -> Option<&'static IconDef> {
        ICONS.iter().find(|def| def.trigger == trigger)
    }

    /// Whether a character starts an icon token.
    pub fn is_trigger(trigger: char) -> bool {
        Self::get(trigger).is_some()
    }

    /// Triggers allowed in the price line (the sun icon is text-only there).
    pub fn price_triggers() -> impl Iterator<Item = char> {
        ICONS
            .iter()
            .map(|def| def.trigger)
            .filter(|&trigger| trigger != '*')
    }
}

/// Icon bitmaps loaded from an asset directory.
///
/// Missing directories or files are not errors: an icon without a bitmap
/// falls back to badge-only rendering.
#[derive(Default)]
pub struct IconAssets {
    images: HashMap<char, RgbaImage>,
}

impl IconAssets {
    /// Load `<asset>.png` for every registered icon found under `dir`.
    pub fn load(dir: &Path) -> Self {
        let mut images = HashMap::new();
        for def in IconRegistry::list() {
            let path = dir.join(format!("{}.png", def.asset));
            match image::open(&path) {
                Ok(img) => {
                    images.insert(def.trigger, img.to_rgba8());
                }
                Err(err) => {
                    log::warn!(
                        "icon bitmap {} unavailable, using badge-only rendering: {}",
                        path.display(),
                        err
                    );
                }
            }
        }
        Self { images }
    }

    /// Registry with no bitmaps at all; every icon renders badge-only.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, trigger: char) -> Option<&RgbaImage> {
        self.images.get(&trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn registry_resolves_known_triggers() {
        let coin = IconRegistry::get('$').expect("coin icon registered");
        assert_eq!(coin.asset, "Coin");
        assert_eq!(coin.badge_color, BadgeColor::Black);
        assert!(IconRegistry::get('&').is_none());
    }

    #[test]
    fn price_triggers_exclude_the_sun() {
        let triggers: Vec<char> = IconRegistry::price_triggers().collect();
        assert!(triggers.contains(&'$'));
        assert!(!triggers.contains(&'*'));
    }

    #[test]
    fn empty_assets_have_no_bitmaps() {
        let assets = IconAssets::empty();
        assert!(assets.get('$').is_none());
    }
}
