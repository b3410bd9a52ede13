//! Card definition records.
//!
//! A [`CardSpec`] is the structured input one render consumes. A
//! [`CardSet`] is a JSONL file holding a typed header line followed by one
//! card record per line, for batch rendering.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::icons::IconRegistry;
use crate::templates::TemplateRegistry;

const SET_VERSION: u8 = 1;

/// Structured input for one card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardSpec {
    pub title: String,
    #[serde(default)]
    pub type_line: String,
    /// Price line in icon markup, e.g. `$5` or `$3^`.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub preview: String,
    /// Multi-paragraph description markup.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub illustration_credit: String,
    #[serde(default)]
    pub creator_credit: String,
    #[serde(default = "default_template")]
    pub template: String,
    /// Extra boldable keywords, semicolon-separated.
    #[serde(default)]
    pub bold_keywords: String,
    /// Font size the description fit loop starts from.
    #[serde(default = "default_description_size")]
    pub description_size: f32,
}

fn default_template() -> String {
    "portrait".to_string()
}

fn default_description_size() -> f32 {
    40.0
}

impl CardSpec {
    /// A filled-in starter card for `card new`.
    pub fn example() -> Self {
        Self {
            title: "Village Smithy".to_string(),
            type_line: "Action".to_string(),
            price: "$4".to_string(),
            preview: String::new(),
            description: "+1 Card\n+2 Actions\n-\nGain a Silver. [i]Heirloom: [/i]return this to the Supply.".to_string(),
            illustration_credit: "Illustration: A. Painter".to_string(),
            creator_credit: "by You".to_string(),
            template: default_template(),
            bold_keywords: String::new(),
            description_size: default_description_size(),
        }
    }

    /// Read one card definition from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read card file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse card definition in {}", path.display()))
    }

    /// Write the definition as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize card")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write card file {}", path.display()))
    }

    /// Non-fatal issues a render would silently degrade around.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Err(err) = TemplateRegistry::get(&self.template) {
            warnings.push(err.to_string());
        }
        for ch in self.price.chars() {
            if IconRegistry::is_trigger(ch) && !IconRegistry::price_triggers().any(|t| t == ch) {
                warnings.push(format!("icon '{ch}' is not allowed in the price line"));
            }
        }
        for (tag, closing) in [("[b]", "[/b]"), ("[i]", "[/i]"), ("[u]", "[/u]")] {
            let opens = self.description.matches(tag).count();
            let closes = self.description.matches(closing).count();
            if opens > closes {
                warnings.push(format!(
                    "unmatched {tag} marker; the style will extend to its paragraph end"
                ));
            } else if closes > opens {
                warnings.push(format!("stray {closing} marker will be ignored"));
            }
        }
        warnings
    }
}

/// Header record of a card set file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetHeader {
    pub version: u8,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SetHeader {
    pub fn new(name: Option<String>) -> Self {
        Self {
            version: SET_VERSION,
            created_at: Utc::now(),
            name,
        }
    }
}

/// In-memory representation of a set file.
#[derive(Debug, Clone)]
pub struct CardSet {
    pub header: SetHeader,
    pub cards: Vec<CardSpec>,
    pub path: Option<PathBuf>,
}

impl CardSet {
    pub fn new(header: SetHeader) -> Self {
        Self {
            header,
            cards: Vec::new(),
            path: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("failed to open set file {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();
        let header_line = lines
            .next()
            .ok_or_else(|| anyhow!("set file {} is empty", path.display()))??;
        let header = match serde_json::from_str(&header_line)
            .with_context(|| format!("failed to parse set header in {}", path.display()))?
        {
            SetLine::Header(header) => header,
            SetLine::Card(_) => return Err(anyhow!("expected set header as first line")),
        };

        let mut cards = Vec::new();
        for (idx, raw) in lines.enumerate() {
            let raw = raw?;
            if raw.trim().is_empty() {
                continue;
            }
            let line: SetLine = serde_json::from_str(&raw).with_context(|| {
                format!(
                    "failed to parse card record at line {} in {}",
                    idx + 2,
                    path.display()
                )
            })?;
            match line {
                SetLine::Header(_) => {
                    return Err(anyhow!(
                        "multiple set headers found in {} at line {}",
                        path.display(),
                        idx + 2
                    ));
                }
                SetLine::Card(card) => cards.push(card),
            }
        }

        Ok(Self {
            header,
            cards,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn save(&mut self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to write set file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &SetLine::Header(self.header.clone()))
            .context("failed to serialize set header")?;
        writer.write_all(b"\n")?;
        for card in &self.cards {
            serde_json::to_writer(&mut writer, &SetLine::Card(card.clone()))
                .context("failed to serialize card record")?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SetLine {
    Header(SetHeader),
    Card(CardSpec),
}
