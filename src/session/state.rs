//! Shared game state for one session.
//!
//! The well-known fields the engine itself interprets are typed; rule
//! authors get one open `custom` map for their own state. Custom state
//! changes that target a well-known key are routed to the typed field so
//! built-in invariants hold no matter where a mutation comes from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cards::Card;

/// Play direction, flipped by the `reverse_direction` effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Clockwise,
    Counterclockwise,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::Counterclockwise,
            Direction::Counterclockwise => Direction::Clockwise,
        }
    }
}

/// Mutable shared state of an active session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Cards played so far; the last element is the top of the pile.
    pub discard_pile: Vec<Card>,

    pub direction: Direction,

    /// Human-readable description of the most recent action.
    pub last_action: String,

    /// Applied special-effect records, keyed by effect type.
    #[serde(default)]
    pub special_conditions: Map<String, Value>,

    /// Rule-author-defined state.
    #[serde(default)]
    pub custom: Map<String, Value>,
}

impl GameState {
    /// Fresh state for a session that just started.
    #[must_use]
    pub fn started() -> Self {
        Self { last_action: "game_started".into(), ..Self::default() }
    }

    /// The top of the discard pile.
    #[must_use]
    pub fn top_of_discard(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// Resolve a named property for rule conditions and requirements.
    ///
    /// Well-known fields shadow custom entries of the same name.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<Value> {
        match property {
            "direction" => serde_json::to_value(self.direction).ok(),
            "last_action" => Some(Value::from(self.last_action.as_str())),
            other => self
                .custom
                .get(other)
                .or_else(|| self.special_conditions.get(other))
                .cloned(),
        }
    }

    /// Merge a state-change mapping.
    ///
    /// `direction` and `last_action` values are routed to the typed
    /// fields; a `direction` value that is not a known direction lands in
    /// `custom` untouched. Everything else goes to `custom`.
    pub fn apply_changes(&mut self, changes: &Map<String, Value>) {
        for (key, value) in changes {
            match key.as_str() {
                "direction" => {
                    if let Ok(direction) = serde_json::from_value(value.clone()) {
                        self.direction = direction;
                    } else {
                        self.custom.insert(key.clone(), value.clone());
                    }
                }
                "last_action" => {
                    if let Some(text) = value.as_str() {
                        self.last_action = text.to_owned();
                    }
                }
                _ => {
                    self.custom.insert(key.clone(), value.clone());
                }
            }
        }
    }

    /// Record an applied special effect under its type name.
    pub fn record_special(&mut self, effect_type: &str, data: Value) {
        self.special_conditions.insert(effect_type.to_owned(), data);
    }
}
