//! Tribute content: the card list, the theme palette and the card modal.
//!
//! The sequence controller only reads the ordered icon list from here; everything else feeds the
//! presentation layer.

pub mod color;
pub mod modal;

use crate::content::color::Rgba8;
use crate::foundation::error::{GiltError, GiltResult};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Glyph drawn for a card, a particle or a decoration.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    Chess,
    Basketball,
    Dragon,
    Starve,
    Running,
    Career,
    Cake,
}

impl IconType {
    pub const ALL: [IconType; 7] = [
        IconType::Chess,
        IconType::Basketball,
        IconType::Dragon,
        IconType::Starve,
        IconType::Running,
        IconType::Career,
        IconType::Cake,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chess => "chess",
            Self::Basketball => "basketball",
            Self::Dragon => "dragon",
            Self::Starve => "starve",
            Self::Running => "running",
            Self::Career => "career",
            Self::Cake => "cake",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == s)
    }
}

/// One tribute card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardData {
    pub id: String,
    pub title: String,
    #[serde(alias = "iconType")]
    pub icon: IconType,
    #[serde(alias = "accentColor")]
    pub accent: Rgba8,
    pub copy: String,
}

/// Page palette.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    pub bg: Rgba8,
    pub text: Rgba8,
    pub gilt: Rgba8,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Rgba8::rgb(0xF5, 0xF5, 0xF5),
            text: Rgba8::rgb(0x3A, 0x3A, 0x3A),
            gilt: Rgba8::rgb(0xD4, 0xB9, 0x6A),
        }
    }
}

/// Read-only content dataset consumed by the controller and the scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContentSet {
    #[serde(default)]
    pub theme: Theme,
    pub cards: Vec<CardData>,
}

impl ContentSet {
    /// Parse content from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> GiltResult<Self> {
        let content: ContentSet = serde_json::from_reader(r)
            .map_err(|e| GiltError::serde(format!("parse content JSON: {e}")))?;
        content.validate()?;
        Ok(content)
    }

    /// Parse content from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GiltResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GiltError::content(format!("open content JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> GiltResult<()> {
        if self.cards.is_empty() {
            return Err(GiltError::content("content must contain at least one card"));
        }
        let mut seen = BTreeSet::new();
        for card in &self.cards {
            if card.id.trim().is_empty() {
                return Err(GiltError::content("card id must be non-empty"));
            }
            if card.title.trim().is_empty() {
                return Err(GiltError::content(format!(
                    "card '{}' title must be non-empty",
                    card.id
                )));
            }
            if !seen.insert(card.id.as_str()) {
                return Err(GiltError::content(format!(
                    "duplicate card id '{}'",
                    card.id
                )));
            }
        }
        Ok(())
    }

    /// Icons in card order; one particle is spawned per entry.
    pub fn icon_sequence(&self) -> Vec<IconType> {
        self.cards.iter().map(|c| c.icon).collect()
    }

    pub fn card(&self, id: &str) -> Option<&CardData> {
        self.cards.iter().find(|c| c.id == id)
    }
}

impl Default for ContentSet {
    fn default() -> Self {
        fn card(id: &str, title: &str, icon: IconType, accent: u32, copy: &str) -> CardData {
            let [_, r, g, b] = accent.to_be_bytes();
            CardData {
                id: id.to_owned(),
                title: title.to_owned(),
                icon,
                accent: Rgba8::rgb(r, g, b),
                copy: copy.to_owned(),
            }
        }

        Self {
            theme: Theme::default(),
            cards: vec![
                card(
                    "chess",
                    "象棋",
                    IconType::Chess,
                    0x8A2B27,
                    "愿你步步为营，亦有闲庭信步",
                ),
                card(
                    "basketball",
                    "篮球",
                    IconType::Basketball,
                    0xE69A49,
                    "愿你起跳有力量，落地有欢喜，愿你未来每个决定都能正中篮心",
                ),
                card(
                    "dragon",
                    "龙族",
                    IconType::Dragon,
                    0x9D3834,
                    "愿你手握屠龙之勇，心藏温柔之乡，something for nothing。前路或许仍有孤独的“尼伯龙根”，但别忘啦你不会是一个人在战斗！",
                ),
                card(
                    "starve",
                    "饥荒",
                    IconType::Starve,
                    0x7A9362,
                    "愿你遍历生存之路，带着“步行手杖”和“切斯特”，步履轻快，满载而归，永不服输，步步皆安",
                ),
                card(
                    "running",
                    "跑步",
                    IconType::Running,
                    0x4A8FBF,
                    "愿你奔赴全马之约，沿途遇见更多山海，跑出晨光，奔入人生的盛夏",
                ),
                card(
                    "career",
                    "事业",
                    IconType::Career,
                    0x3F4E68,
                    "愿你履新进阶，统筹有度，以专业赴新程、赴成长，祝你前路坦荡",
                ),
            ],
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/content/content.rs"]
mod tests;
