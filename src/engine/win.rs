//! Win detection.

use crate::rules::WinCondition;
use crate::session::{Player, Session};

/// Evaluates the rule document's win condition against session state.
pub struct WinDetector;

impl WinDetector {
    /// The winning player, if the win condition currently holds.
    ///
    /// Ties under the score conditions break to the first player in
    /// position order. `last_player_standing` only fires with exactly
    /// one active player.
    #[must_use]
    pub fn detect(session: &Session) -> Option<&Player> {
        let players = session.players();

        match session.rules().rules.win_condition {
            WinCondition::FirstToEmptyHand => players.iter().find(|p| p.hand.is_empty()),
            WinCondition::HighestScore => Self::best_by(players, |a, b| a.score >= b.score),
            WinCondition::LowestScore => Self::best_by(players, |a, b| a.score <= b.score),
            WinCondition::LastPlayerStanding => {
                let mut active = players.iter().filter(|p| p.is_active);
                match (active.next(), active.next()) {
                    (Some(only), None) => Some(only),
                    _ => None,
                }
            }
        }
    }

    /// First player (position order) for which `keep(best, candidate)`
    /// holds against every later candidate.
    fn best_by(players: &[Player], keep: impl Fn(&Player, &Player) -> bool) -> Option<&Player> {
        players.iter().fold(None, |best, candidate| match best {
            Some(current) if keep(current, candidate) => Some(current),
            _ => Some(candidate),
        })
    }
}
