//! Card-play legality rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::criteria::Criteria;
use super::effects::SpecialEffect;

/// The card-play section of a rule document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardPlayRules {
    /// Legality predicates checked against the top of the discard pile.
    /// A card is playable iff any rule matches.
    #[serde(default)]
    pub play_rules: Vec<PlayRule>,

    /// Criteria the opening card must satisfy when the discard pile is
    /// empty. Absent means any card opens.
    #[serde(default)]
    pub first_card_rules: Option<Criteria>,

    /// Effects triggered by playing a matching card.
    #[serde(default)]
    pub special_effects: Vec<SpecialEffect>,
}

/// One legality predicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayRule {
    /// The named field must equal the top discard's field.
    MatchProperty { property: String },
    /// Any of the named fields must equal the top discard's field.
    MatchAnyProperties { properties: Vec<String> },
    /// All of the named fields must equal the top discard's fields.
    MatchAllProperties { properties: Vec<String> },
    /// The card itself matches a criteria set (e.g. `type = wild`),
    /// regardless of the discard pile.
    AlwaysPlayable {
        #[serde(default)]
        criteria: Criteria,
    },
    /// A predicate over game state or a numeric card property.
    Conditional { condition: Condition },
}

/// Conditional predicates for [`PlayRule::Conditional`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// A game-state property equals the given value.
    StateProperty { property: String, value: Value },
    /// Numeric comparison against the card's `count` property.
    CardCount {
        #[serde(default)]
        operator: CountOperator,
        value: i64,
    },
}

/// Comparison operators for [`Condition::CardCount`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountOperator {
    LessThan,
    #[default]
    Equals,
}
