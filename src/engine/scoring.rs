//! Score calculation.

use rustc_hash::FxHashMap;

use crate::rules::Scoring;
use crate::session::Player;

/// Computes a player's score under a declared scoring method.
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Compute the score for one player.
    #[must_use]
    pub fn compute(player: &Player, scoring: &Scoring) -> i64 {
        match scoring {
            Scoring::Points { points } => player
                .hand
                .iter()
                .map(|card| {
                    points
                        .get(&card.rank)
                        .or_else(|| points.get(&card.kind))
                        .or_else(|| points.get("default"))
                        .copied()
                        .unwrap_or(0)
                })
                .sum(),
            Scoring::Sets { set_points } => {
                let mut groups: FxHashMap<&str, i64> = FxHashMap::default();
                for card in &player.hand {
                    *groups.entry(card.rank.as_str()).or_default() += 1;
                }
                let sets = groups.values().filter(|&&size| size >= 2).count() as i64;
                sets * set_points
            }
            Scoring::Elimination => i64::from(player.hand.is_empty()),
            Scoring::Custom { default_score } => *default_score,
        }
    }

    /// Compute with an optional scoring section; no section scores 0.
    #[must_use]
    pub fn compute_opt(player: &Player, scoring: Option<&Scoring>) -> i64 {
        scoring.map_or(0, |s| Self::compute(player, s))
    }
}
