//! Card-matching criteria.
//!
//! A criteria set maps card field names to expected values. A list value
//! means "the card's field is a member of this list"; a scalar means
//! equality. All entries must match.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cards::Card;

/// One criterion: either a set of acceptable values or a single value.
///
/// `OneOf` is listed first so JSON arrays decode as membership tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Criterion {
    OneOf(Vec<Value>),
    Equals(Value),
}

impl Criterion {
    /// Check a resolved card field value against this criterion.
    #[must_use]
    pub fn matches(&self, actual: &Value) -> bool {
        match self {
            Criterion::OneOf(options) => options.contains(actual),
            Criterion::Equals(expected) => expected == actual,
        }
    }
}

/// A conjunction of field criteria.
///
/// The empty set matches every card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(pub BTreeMap<String, Criterion>);

impl Criteria {
    /// Check a card against all criteria. Fields the card does not carry
    /// fail their criterion.
    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        self.0.iter().all(|(field, criterion)| {
            card.field(field)
                .map_or(false, |actual| criterion.matches(&actual))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
