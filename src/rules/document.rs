//! The rule document itself and its deck configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{CardOverrides, CardTemplate};
use crate::error::{EngineError, EngineResult};

use super::actions::CustomAction;
use super::criteria::Criteria;
use super::play::CardPlayRules;
use super::scoring::{Scoring, WinCondition};

fn default_version() -> String {
    "1.0".into()
}

fn default_hand_size() -> usize {
    7
}

fn default_true() -> bool {
    true
}

fn default_times() -> u32 {
    1
}

fn default_joker_count() -> u32 {
    2
}

/// The immutable configuration describing one game variant.
///
/// Read-only for the lifetime of every session that references it; safe
/// to share and cache across sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleDocument {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub deck_size: usize,
    pub min_players: usize,
    pub max_players: usize,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(rename = "rules_data")]
    pub rules: RulesData,
}

/// The rules payload of a document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulesData {
    #[serde(default = "default_hand_size")]
    pub initial_hand_size: usize,
    pub win_condition: WinCondition,
    pub turn_actions: Vec<String>,
    #[serde(rename = "deck_configuration")]
    pub deck: DeckConfig,
    #[serde(default)]
    pub card_play_rules: CardPlayRules,
    #[serde(default)]
    pub custom_actions: BTreeMap<String, CustomAction>,
    #[serde(default)]
    pub scoring: Option<Scoring>,
}

/// Deck composition: templates plus ordered transformations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    pub cards: Vec<CardTemplate>,
    #[serde(default)]
    pub transformations: Vec<Transformation>,
    #[serde(default = "default_true")]
    pub shuffle: bool,
}

/// Deck-level transformations, applied in document order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transformation {
    /// Clone the matching subset `times` times with fresh ids.
    DuplicateSubset {
        #[serde(default)]
        criteria: Criteria,
        #[serde(default = "default_times")]
        times: u32,
    },
    /// Append `count` cards built from the joker template.
    AddJokers {
        #[serde(default = "default_joker_count")]
        count: u32,
        #[serde(default, rename = "joker_definition")]
        joker: Option<CardTemplate>,
    },
    /// Merge field overrides into every card whose rank (checked first)
    /// or suit is a key of the mapping.
    CustomMapping {
        #[serde(default)]
        mapping: BTreeMap<String, CardOverrides>,
    },
}

impl RuleDocument {
    /// Decode a document from a JSON value, rejecting unknown tags and
    /// malformed sections eagerly.
    pub fn from_json(value: serde_json::Value) -> EngineResult<Self> {
        serde_json::from_value(value).map_err(|e| EngineError::Configuration(e.to_string()))
    }

    /// Decode a document from JSON text.
    pub fn from_json_str(text: &str) -> EngineResult<Self> {
        serde_json::from_str(text).map_err(|e| EngineError::Configuration(e.to_string()))
    }

    /// Authoring-time validation.
    ///
    /// Checks player bounds, a non-empty deck spec, and that base
    /// template counts sum to `deck_size`. Transformations may grow the
    /// deck past `deck_size`; only the base composition is checked.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_players == 0 {
            return Err(EngineError::Configuration("min_players must be at least 1".into()));
        }
        if self.max_players < self.min_players {
            return Err(EngineError::Configuration(
                "max_players must be greater than or equal to min_players".into(),
            ));
        }
        if self.deck_size == 0 {
            return Err(EngineError::Configuration("deck_size must be at least 1".into()));
        }
        if self.rules.deck.cards.is_empty() {
            return Err(EngineError::Configuration(
                "deck_configuration must include a non-empty cards array".into(),
            ));
        }
        if self.rules.turn_actions.is_empty() {
            return Err(EngineError::Configuration("turn_actions must not be empty".into()));
        }

        let total: usize = self.rules.deck.cards.iter().map(|c| c.count as usize).sum();
        if total != self.deck_size {
            return Err(EngineError::Configuration(format!(
                "deck_size {} does not match total cards in deck_configuration ({total})",
                self.deck_size
            )));
        }

        Ok(())
    }

    /// Whether the named action is listed in `turn_actions`.
    #[must_use]
    pub fn allows_action(&self, action: &str) -> bool {
        self.rules.turn_actions.iter().any(|a| a == action)
    }

    /// Look up a declared custom action.
    #[must_use]
    pub fn custom_action(&self, name: &str) -> Option<&CustomAction> {
        self.rules.custom_actions.get(name)
    }

    /// "2-4 players" style summary.
    #[must_use]
    pub fn player_range(&self) -> String {
        format!("{}-{} players", self.min_players, self.max_players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_doc(deck_size: usize, counts: &[u32]) -> serde_json::Value {
        let cards: Vec<_> = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| json!({"rank": format!("r{i}"), "count": count}))
            .collect();

        json!({
            "name": "test game",
            "description": "a test game",
            "deck_size": deck_size,
            "min_players": 2,
            "max_players": 4,
            "rules_data": {
                "initial_hand_size": 5,
                "win_condition": "first_to_empty_hand",
                "turn_actions": ["play_card", "draw_card", "pass"],
                "deck_configuration": {"cards": cards},
            },
        })
    }

    #[test]
    fn test_decode_minimal() {
        let doc = RuleDocument::from_json(minimal_doc(3, &[1, 2])).unwrap();

        assert_eq!(doc.name, "test game");
        assert_eq!(doc.version, "1.0");
        assert_eq!(doc.rules.initial_hand_size, 5);
        assert!(doc.rules.deck.shuffle);
        assert!(doc.allows_action("pass"));
        assert!(!doc.allows_action("discard"));
    }

    #[test]
    fn test_validate_ok() {
        let doc = RuleDocument::from_json(minimal_doc(3, &[1, 2])).unwrap();
        doc.validate().unwrap();
    }

    #[test]
    fn test_validate_count_mismatch() {
        let doc = RuleDocument::from_json(minimal_doc(5, &[1, 2])).unwrap();
        let err = doc.validate().unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_validate_player_bounds() {
        let mut doc = RuleDocument::from_json(minimal_doc(3, &[1, 2])).unwrap();
        doc.max_players = 1;
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_validate_empty_deck() {
        let mut value = minimal_doc(3, &[1, 2]);
        value["rules_data"]["deck_configuration"]["cards"] = json!([]);
        let doc = RuleDocument::from_json(value).unwrap();
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_missing_deck_configuration_rejected() {
        let mut value = minimal_doc(3, &[1, 2]);
        value["rules_data"]
            .as_object_mut()
            .unwrap()
            .remove("deck_configuration");
        assert!(RuleDocument::from_json(value).is_err());
    }

    #[test]
    fn test_decode_transformations() {
        let mut value = minimal_doc(3, &[1, 2]);
        value["rules_data"]["deck_configuration"]["transformations"] = json!([
            {"type": "duplicate_subset", "criteria": {"rank": "r0"}, "times": 2},
            {"type": "add_jokers"},
            {"type": "custom_mapping", "mapping": {"r1": {"value": 20}}},
        ]);

        let doc = RuleDocument::from_json(value).unwrap();
        let transformations = &doc.rules.deck.transformations;

        assert_eq!(transformations.len(), 3);
        assert!(matches!(
            transformations[1],
            Transformation::AddJokers { count: 2, joker: None }
        ));
    }

    #[test]
    fn test_unknown_transformation_rejected() {
        let mut value = minimal_doc(3, &[1, 2]);
        value["rules_data"]["deck_configuration"]["transformations"] =
            json!([{"type": "mirror_deck"}]);
        assert!(RuleDocument::from_json(value).is_err());
    }

    #[test]
    fn test_custom_action_lookup() {
        let mut value = minimal_doc(3, &[1, 2]);
        value["rules_data"]["custom_actions"] =
            json!({"knock": {"requirements": [{"type": "hand_size", "minimum": 1}]}});

        let doc = RuleDocument::from_json(value).unwrap();
        assert!(doc.custom_action("knock").is_some());
        assert!(doc.custom_action("slap").is_none());
    }

    #[test]
    fn test_player_range() {
        let doc = RuleDocument::from_json(minimal_doc(3, &[1, 2])).unwrap();
        assert_eq!(doc.player_range(), "2-4 players");
    }
}
