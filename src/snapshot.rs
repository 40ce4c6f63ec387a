//! Privacy-preserving session views.
//!
//! A snapshot is everything one viewer is allowed to see: full hand
//! contents for the viewer themself, hand sizes only for everyone else.
//! The deck is never exposed beyond its remaining count.

use serde::Serialize;
use time::OffsetDateTime;

use crate::cards::Card;
use crate::session::{Direction, Player, Session, SessionId, SessionStatus};

/// One player as seen by a particular viewer.
#[derive(Clone, Debug, Serialize)]
pub struct PlayerSnapshot {
    pub user_id: String,
    pub username: String,
    pub position: usize,
    pub score: i64,
    pub is_active: bool,
    pub is_current_player: bool,
    pub hand_size: usize,
    /// Present only when this entry describes the viewer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

impl PlayerSnapshot {
    fn of(player: &Player, viewer: Option<&str>, is_current: bool) -> Self {
        let is_viewer = viewer == Some(player.user_id.as_str());
        Self {
            user_id: player.user_id.clone(),
            username: player.username.clone(),
            position: player.position,
            score: player.score,
            is_active: player.is_active,
            is_current_player: is_current,
            hand_size: player.hand_size(),
            hand: is_viewer.then(|| player.hand.clone()),
        }
    }
}

/// The shared-state portion of a snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct GameStateSnapshot {
    pub discard_pile: Vec<Card>,
    pub direction: Direction,
    pub last_action: String,
    pub special_conditions: serde_json::Map<String, serde_json::Value>,
    pub custom: serde_json::Map<String, serde_json::Value>,
    pub deck_remaining: usize,
}

/// A full point-in-time view of a session for one viewer.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub rule_name: String,
    pub status: SessionStatus,
    pub current_player_index: usize,
    pub turn_count: u32,
    pub players: Vec<PlayerSnapshot>,
    pub player_count: usize,
    pub can_join: bool,
    pub can_start: bool,
    pub is_full: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub finished_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<String>,
    /// Seconds since start, up to finish for ended sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    pub game_state: GameStateSnapshot,
}

impl SessionSnapshot {
    /// Capture a session as seen by `viewer`. A `None` viewer (or an
    /// unseated one) sees no hand contents at all.
    #[must_use]
    pub fn capture(session: &Session, viewer: Option<&str>) -> Self {
        let state = session.state();
        let current_id = session.current_player().map(|p| p.user_id.clone());
        Self {
            id: session.id(),
            rule_name: session.rules().name.clone(),
            status: session.status(),
            current_player_index: session.current_player_index(),
            turn_count: session.turn_count(),
            players: session
                .players()
                .iter()
                .map(|p| {
                    PlayerSnapshot::of(p, viewer, current_id.as_deref() == Some(p.user_id.as_str()))
                })
                .collect(),
            player_count: session.player_count(),
            can_join: session.can_join(),
            can_start: session.can_start(),
            is_full: session.is_full(),
            started_at: session.started_at(),
            finished_at: session.finished_at(),
            winner_id: session.winner_id().map(str::to_owned),
            duration_seconds: session.duration().map(|d| d.as_seconds_f64()),
            game_state: GameStateSnapshot {
                discard_pile: state.discard_pile.clone(),
                direction: state.direction,
                last_action: state.last_action.clone(),
                special_conditions: state.special_conditions.clone(),
                custom: state.custom.clone(),
                deck_remaining: session.deck().len(),
            },
        }
    }
}
