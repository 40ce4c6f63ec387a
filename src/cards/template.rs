//! Card templates: the declarative shapes a deck spec is written in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Card, CardId};

fn default_count() -> u32 {
    1
}

/// One card template from a deck specification.
///
/// Emits `count` copies at build time. Absent fields take the documented
/// defaults when the template is instantiated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    #[serde(default = "default_count")]
    pub count: u32,
    pub suit: Option<String>,
    pub rank: Option<String>,
    pub value: Option<i64>,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self {
            count: 1,
            suit: None,
            rank: None,
            value: None,
            color: None,
            kind: None,
            display_name: None,
            properties: Map::new(),
        }
    }
}

impl CardTemplate {
    /// Instantiate one card with a fresh ID, defaulting absent fields.
    #[must_use]
    pub fn instantiate(&self, id: CardId) -> Card {
        let suit = self.suit.clone().unwrap_or_else(|| "default".into());
        let rank = self.rank.clone().unwrap_or_else(|| "unknown".into());
        let display_name = self
            .display_name
            .clone()
            .unwrap_or_else(|| format!("{rank} of {suit}"));

        Card {
            id,
            suit,
            rank,
            value: self.value.unwrap_or(0),
            color: self.color.clone().unwrap_or_else(|| "default".into()),
            kind: self.kind.clone().unwrap_or_else(|| "basic".into()),
            display_name,
            properties: self.properties.clone(),
        }
    }

    /// The default joker template used by the `add_jokers` transformation.
    #[must_use]
    pub fn joker() -> Self {
        Self {
            count: 1,
            suit: Some("joker".into()),
            rank: Some("joker".into()),
            value: Some(50),
            color: Some("red".into()),
            kind: Some("wild".into()),
            display_name: None,
            properties: Map::new(),
        }
    }
}

/// Partial field overrides applied by the `custom_mapping` transformation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardOverrides {
    pub suit: Option<String>,
    pub rank: Option<String>,
    pub value: Option<i64>,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl CardOverrides {
    /// Merge these overrides into a card. Absent fields are untouched;
    /// `properties` entries overwrite per key.
    pub fn apply(&self, card: &mut Card) {
        if let Some(suit) = &self.suit {
            card.suit = suit.clone();
        }
        if let Some(rank) = &self.rank {
            card.rank = rank.clone();
        }
        if let Some(value) = self.value {
            card.value = value;
        }
        if let Some(color) = &self.color {
            card.color = color.clone();
        }
        if let Some(kind) = &self.kind {
            card.kind = kind.clone();
        }
        if let Some(name) = &self.display_name {
            card.display_name = name.clone();
        }
        for (key, value) in &self.properties {
            card.properties.insert(key.clone(), value.clone());
        }
    }
}
