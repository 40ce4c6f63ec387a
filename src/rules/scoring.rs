//! Scoring methods and win conditions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_set_points() -> i64 {
    1
}

/// The scoring method declared by a rule document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scoring {
    /// Sum a per-card points lookup over the hand: by rank, falling back
    /// to type, falling back to the `default` entry, falling back to 0.
    Points {
        #[serde(default)]
        points: BTreeMap<String, i64>,
    },
    /// Count rank groups of two or more, multiplied by `set_points`.
    Sets {
        #[serde(default = "default_set_points")]
        set_points: i64,
    },
    /// 1 for an empty hand, 0 otherwise.
    Elimination,
    /// A flat configured score.
    Custom {
        #[serde(default)]
        default_score: i64,
    },
}

/// The rule-declared predicate that ends a session with a winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    FirstToEmptyHand,
    HighestScore,
    LowestScore,
    LastPlayerStanding,
}
