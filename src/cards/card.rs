//! Runtime card values.
//!
//! A `Card` is a concrete card in one deck instance. Identity is the
//! build-time `id`; `suit`/`rank` pairs are not guaranteed unique because
//! deck specs may declare duplicates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Card identifier, unique within one deck build.
///
/// Assigned sequentially from 1 by the deck builder; monotonically
/// increasing across transformations that add cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A concrete card.
///
/// The fixed fields cover what the engine itself interprets; `properties`
/// is an open map for rule-author metadata, consulted by criteria
/// matching when a criterion names no fixed field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: String,
    pub rank: String,
    pub value: i64,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub display_name: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Card {
    /// Resolve a named field for criteria matching.
    ///
    /// Fixed fields take precedence over `properties` entries of the same
    /// name. Returns `None` for fields the card does not carry.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::from(self.id.raw())),
            "suit" => Some(Value::from(self.suit.as_str())),
            "rank" => Some(Value::from(self.rank.as_str())),
            "value" => Some(Value::from(self.value)),
            "color" => Some(Value::from(self.color.as_str())),
            "type" => Some(Value::from(self.kind.as_str())),
            "display_name" => Some(Value::from(self.display_name.as_str())),
            other => self.properties.get(other).cloned(),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name)
    }
}
