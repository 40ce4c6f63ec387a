//! Custom actions: rule-author-defined moves beyond the built-in four.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::criteria::Criteria;

/// A named custom action with its requirements and consequences.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomAction {
    /// Checked in declaration order; the first unmet requirement fails
    /// the action before any state changes.
    #[serde(default)]
    pub requirements: Vec<Requirement>,

    /// Merged into game state when the action succeeds.
    #[serde(default)]
    pub state_changes: Map<String, Value>,

    /// Last-action message; a generic one is derived when absent.
    #[serde(default)]
    pub message: Option<String>,
}

/// One requirement with an optional human-readable description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(flatten)]
    pub check: RequirementCheck,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Requirement {
    /// The description reported when this requirement is not met.
    #[must_use]
    pub fn describe(&self) -> String {
        if let Some(description) = &self.description {
            return description.clone();
        }
        match &self.check {
            RequirementCheck::HasCard { .. } => "a matching card in hand".into(),
            RequirementCheck::HandSize { minimum } => {
                format!("at least {minimum} cards in hand")
            }
            RequirementCheck::GameState { property, value } => {
                format!("game state '{property}' must equal {value}")
            }
        }
    }
}

/// The closed set of requirement checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequirementCheck {
    /// The player holds at least one card matching the criteria.
    HasCard { criteria: Criteria },
    /// The player's hand has at least `minimum` cards.
    HandSize { minimum: usize },
    /// A game-state property equals the given value.
    GameState { property: String, value: Value },
}
