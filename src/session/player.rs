//! Per-player session state.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::cards::{Card, CardId};

/// One player in a session.
///
/// The hand is owned exclusively by the player; `position` is unique and
/// dense per session (0..N-1), maintained by the session on add/remove.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: String,
    pub username: String,
    pub hand: Vec<Card>,
    pub score: i64,
    pub position: usize,
    pub is_active: bool,
    #[serde(default)]
    pub last_action_at: Option<OffsetDateTime>,
}

impl Player {
    /// Create a player with an empty hand at the given position.
    #[must_use]
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, position: usize) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            hand: Vec::new(),
            score: 0,
            position,
            is_active: true,
            last_action_at: None,
        }
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn has_card(&self, id: CardId) -> bool {
        self.hand.iter().any(|c| c.id == id)
    }

    /// Find a card in hand without removing it.
    #[must_use]
    pub fn find_card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id == id)
    }

    /// Remove a card from hand, stamping `last_action_at`.
    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        let index = self.hand.iter().position(|c| c.id == id)?;
        let card = self.hand.remove(index);
        self.touch();
        Some(card)
    }

    /// Add a drawn card to hand, stamping `last_action_at`.
    pub fn draw(&mut self, card: Card) {
        self.hand.push(card);
        self.touch();
    }

    /// Set the score, clamped at zero.
    pub fn set_score(&mut self, score: i64) {
        self.score = score.max(0);
    }

    /// Stamp `last_action_at` with the current time.
    pub fn touch(&mut self) {
        self.last_action_at = Some(OffsetDateTime::now_utc());
    }
}
