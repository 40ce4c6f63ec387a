//! The session lifecycle state machine.
//!
//! `waiting → active → {paused ⇄ active} → finished`, with `cancelled`
//! reachable from any non-terminal state. A session exclusively owns its
//! deck and every player's hand; the rule document it references is
//! read-only and shared.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::cards::Card;
use crate::deck::DeckBuilder;
use crate::error::{EngineError, EngineResult};
use crate::rng::GameRng;
use crate::rules::RuleDocument;

use super::player::Player;
use super::state::GameState;

/// Session identifier, assigned by the session manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session lifecycle states. `Finished` and `Cancelled` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Waiting,
    Active,
    Paused,
    Finished,
    Cancelled,
}

impl SessionStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Waiting => "waiting",
            SessionStatus::Active => "active",
            SessionStatus::Paused => "paused",
            SessionStatus::Finished => "finished",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

/// One live game being played under a rule document.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    rules: Arc<RuleDocument>,
    status: SessionStatus,
    players: Vec<Player>,
    deck: Vec<Card>,
    state: GameState,
    current_player_index: usize,
    turn_count: u32,
    winner_id: Option<String>,
    started_at: Option<OffsetDateTime>,
    finished_at: Option<OffsetDateTime>,
}

impl Session {
    /// Create a session in `waiting` with an empty roster.
    #[must_use]
    pub fn new(id: SessionId, rules: Arc<RuleDocument>) -> Self {
        Self {
            id,
            rules,
            status: SessionStatus::Waiting,
            players: Vec::new(),
            deck: Vec::new(),
            state: GameState::default(),
            current_player_index: 0,
            turn_count: 0,
            winner_id: None,
            started_at: None,
            finished_at: None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn rules(&self) -> &Arc<RuleDocument> {
        &self.rules
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    #[must_use]
    pub fn winner_id(&self) -> Option<&str> {
        self.winner_id.as_deref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<OffsetDateTime> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<OffsetDateTime> {
        self.finished_at
    }

    /// Elapsed time since start, up to finish for ended sessions.
    #[must_use]
    pub fn duration(&self) -> Option<time::Duration> {
        let started = self.started_at?;
        let end = self.finished_at.unwrap_or_else(OffsetDateTime::now_utc);
        Some(end - started)
    }

    // === Roster queries ===

    #[must_use]
    pub fn can_join(&self) -> bool {
        self.status == SessionStatus::Waiting && self.players.len() < self.rules.max_players
    }

    #[must_use]
    pub fn can_start(&self) -> bool {
        self.status == SessionStatus::Waiting
            && self.players.len() >= self.rules.min_players
            && self.players.len() <= self.rules.max_players
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.rules.max_players
    }

    /// The player whose turn it is; `None` unless active.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        if self.status != SessionStatus::Active {
            return None;
        }
        self.players.get(self.current_player_index)
    }

    #[must_use]
    pub fn find_player(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn find_player_mut(&mut self, user_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.user_id == user_id)
    }

    // === Roster mutation ===

    /// Add a player. Fails silently (returns false) unless the session is
    /// waiting with room, or when the user is already seated.
    pub fn add_player(&mut self, user_id: impl Into<String>, username: impl Into<String>) -> bool {
        let user_id = user_id.into();
        if !self.can_join() || self.find_player(&user_id).is_some() {
            return false;
        }
        let position = self.players.len();
        self.players.push(Player::new(user_id, username, position));
        true
    }

    /// Remove a player and re-densify positions. Cancels the session when
    /// the remaining roster drops below `min_players`.
    pub fn remove_player(&mut self, user_id: &str) -> bool {
        let Some(index) = self.players.iter().position(|p| p.user_id == user_id) else {
            return false;
        };
        self.players.remove(index);
        for (position, player) in self.players.iter_mut().enumerate() {
            player.position = position;
        }
        if index < self.current_player_index && self.current_player_index > 0 {
            self.current_player_index -= 1;
        } else if !self.players.is_empty() {
            self.current_player_index %= self.players.len();
        }
        if self.players.len() < self.rules.min_players {
            self.cancel();
        }
        true
    }

    // === Lifecycle transitions ===

    /// Start the session: build the deck, deal initial hands, seed game
    /// state, and go active.
    ///
    /// Fails with `NotEnoughCards` when the built deck cannot cover the
    /// initial deal — short hands are a configuration mistake, not a
    /// game state.
    pub fn start(&mut self, rng: &mut GameRng) -> EngineResult<()> {
        if self.status != SessionStatus::Waiting {
            return Err(EngineError::IllegalState {
                expected: "waiting",
                actual: self.status.as_str(),
            });
        }
        if !self.can_start() {
            return Err(EngineError::Validation(format!(
                "game session needs {} players, has {}",
                self.rules.player_range(),
                self.players.len()
            )));
        }

        let mut deck = DeckBuilder::build(&self.rules.rules.deck, rng);
        let hand_size = self.rules.rules.initial_hand_size;
        let needed = self.players.len() * hand_size;
        if deck.len() < needed {
            return Err(EngineError::NotEnoughCards { needed, available: deck.len() });
        }

        for player in &mut self.players {
            player.hand = deck.split_off(deck.len() - hand_size);
        }

        self.deck = deck;
        self.state = GameState::started();
        self.current_player_index = 0;
        self.turn_count = 1;
        self.status = SessionStatus::Active;
        self.started_at = Some(OffsetDateTime::now_utc());
        Ok(())
    }

    /// Advance the turn pointer. No-op unless active.
    pub fn advance_turn(&mut self) -> bool {
        if self.status != SessionStatus::Active || self.players.is_empty() {
            return false;
        }
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        self.turn_count += 1;
        true
    }

    /// Pause. No-op unless active.
    pub fn pause(&mut self) -> bool {
        if self.status != SessionStatus::Active {
            return false;
        }
        self.status = SessionStatus::Paused;
        true
    }

    /// Resume. No-op unless paused.
    pub fn resume(&mut self) -> bool {
        if self.status != SessionStatus::Paused {
            return false;
        }
        self.status = SessionStatus::Active;
        true
    }

    /// Finish with an optional winner.
    pub fn finish(&mut self, winner_id: Option<String>) {
        self.status = SessionStatus::Finished;
        self.finished_at = Some(OffsetDateTime::now_utc());
        self.winner_id = winner_id;
    }

    /// Cancel unconditionally.
    pub fn cancel(&mut self) {
        self.status = SessionStatus::Cancelled;
    }

    // === Deck ===

    /// Draw from the tail of the deck.
    pub fn draw_from_deck(&mut self) -> Option<Card> {
        self.deck.pop()
    }

    /// Draw one card into the hand of the player at `position`.
    ///
    /// Returns false without mutating when the deck is empty or the
    /// position is vacant.
    pub fn draw_into_hand(&mut self, position: usize) -> bool {
        if self.players.get(position).is_none() {
            return false;
        }
        let Some(card) = self.deck.pop() else {
            return false;
        };
        // Position checked above.
        self.players[position].draw(card);
        true
    }

    /// Discard a card onto the pile.
    pub fn push_discard(&mut self, card: Card) {
        self.state.discard_pile.push(card);
    }
}
