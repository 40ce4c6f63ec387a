//! Card-play legality.

use crate::cards::Card;
use crate::rules::{CardPlayRules, Condition, CountOperator, PlayRule};
use crate::session::GameState;

/// Whether a card may legally be played onto the current discard pile.
///
/// With an empty pile the card is legal unless first-card rules say
/// otherwise. With a non-empty pile, any matching play rule makes the
/// card legal.
#[must_use]
pub fn can_play(card: &Card, state: &GameState, rules: &CardPlayRules) -> bool {
    match state.top_of_discard() {
        None => rules
            .first_card_rules
            .as_ref()
            .map_or(true, |criteria| criteria.matches(card)),
        Some(top) => rules
            .play_rules
            .iter()
            .any(|rule| rule_matches(rule, card, top, state)),
    }
}

fn rule_matches(rule: &PlayRule, card: &Card, top: &Card, state: &GameState) -> bool {
    match rule {
        PlayRule::MatchProperty { property } => fields_equal(card, top, property),
        PlayRule::MatchAnyProperties { properties } => {
            properties.iter().any(|p| fields_equal(card, top, p))
        }
        PlayRule::MatchAllProperties { properties } => {
            properties.iter().all(|p| fields_equal(card, top, p))
        }
        PlayRule::AlwaysPlayable { criteria } => criteria.matches(card),
        PlayRule::Conditional { condition } => condition_holds(condition, card, state),
    }
}

fn fields_equal(card: &Card, top: &Card, property: &str) -> bool {
    match (card.field(property), top.field(property)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn condition_holds(condition: &Condition, card: &Card, state: &GameState) -> bool {
    match condition {
        Condition::StateProperty { property, value } => {
            state.get(property).as_ref() == Some(value)
        }
        Condition::CardCount { operator, value } => card
            .field("count")
            .and_then(|v| v.as_i64())
            .map_or(false, |count| match operator {
                CountOperator::LessThan => count < *value,
                CountOperator::Equals => count == *value,
            }),
    }
}
