//! Concurrent session management.
//!
//! The manager owns a registry of live sessions, each behind its own
//! lock, so turns in different sessions proceed in parallel while a
//! turn within one session is atomic: validate, execute, advance,
//! rescore, and win-check all happen under one lock acquisition.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::engine::{ScoreCalculator, TurnOutcome, TurnProcessor, TurnRequest, WinDetector};
use crate::error::{EngineError, EngineResult};
use crate::rng::GameRng;
use crate::rules::RuleDocument;
use crate::session::{Session, SessionId, SessionStatus};
use crate::snapshot::SessionSnapshot;

/// Registry listing filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionFilter {
    #[default]
    All,
    /// Waiting sessions with an open seat.
    Joinable,
    Status(SessionStatus),
}

impl SessionFilter {
    fn admits(self, session: &Session) -> bool {
        match self {
            SessionFilter::All => true,
            SessionFilter::Joinable => session.can_join(),
            SessionFilter::Status(status) => session.status() == status,
        }
    }
}

/// Owns every live session and serializes access to each.
pub struct SessionManager {
    sessions: RwLock<FxHashMap<SessionId, Arc<Mutex<Session>>>>,
    next_id: AtomicU64,
    /// Master RNG; each session gets an independent fork at start.
    rng: Mutex<GameRng>,
}

impl SessionManager {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            sessions: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
            rng: Mutex::new(GameRng::new(seed)),
        }
    }

    /// A manager seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        let rng = GameRng::from_entropy();
        Self {
            sessions: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
            rng: Mutex::new(rng),
        }
    }

    /// Validate the rule document, create a session, and seat the creator.
    pub fn create_session(
        &self,
        rules: Arc<RuleDocument>,
        creator_id: &str,
        creator_name: &str,
    ) -> EngineResult<SessionId> {
        rules.validate()?;

        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut session = Session::new(id, rules.clone());
        session.add_player(creator_id, creator_name);

        self.sessions.write().insert(id, Arc::new(Mutex::new(session)));
        info!(session = %id, rules = %rules.name, creator = creator_id, "session created");
        Ok(id)
    }

    /// Seat a player. Fails when the session is not joinable or the user
    /// is already seated.
    pub fn join(&self, id: SessionId, user_id: &str, username: &str) -> EngineResult<()> {
        let handle = self.handle(id)?;
        let mut session = handle.lock();

        if !session.add_player(user_id, username) {
            return Err(EngineError::Validation(format!(
                "user '{user_id}' cannot join game session {id}"
            )));
        }
        debug!(session = %id, user = user_id, "player joined");
        Ok(())
    }

    /// Unseat a player. The session cancels itself when the roster drops
    /// below the rule document's minimum.
    pub fn leave(&self, id: SessionId, user_id: &str) -> EngineResult<()> {
        let handle = self.handle(id)?;
        let mut session = handle.lock();

        if !session.remove_player(user_id) {
            return Err(EngineError::PlayerNotFound(user_id.to_owned()));
        }
        debug!(session = %id, user = user_id, status = session.status().as_str(), "player left");
        Ok(())
    }

    /// Start a waiting session with a fork of the master RNG.
    pub fn start(&self, id: SessionId) -> EngineResult<()> {
        let handle = self.handle(id)?;
        let mut session = handle.lock();

        let mut rng = self.rng.lock().fork();
        session.start(&mut rng)?;
        info!(session = %id, players = session.player_count(), "session started");
        Ok(())
    }

    pub fn pause(&self, id: SessionId) -> EngineResult<()> {
        self.transition(id, "active", Session::pause)
    }

    pub fn resume(&self, id: SessionId) -> EngineResult<()> {
        self.transition(id, "paused", Session::resume)
    }

    /// Cancel a session; terminal states stay as they are.
    pub fn cancel(&self, id: SessionId) -> EngineResult<()> {
        let handle = self.handle(id)?;
        let mut session = handle.lock();

        match session.status() {
            SessionStatus::Finished | SessionStatus::Cancelled => Err(EngineError::IllegalState {
                expected: "non-terminal",
                actual: session.status().as_str(),
            }),
            _ => {
                session.cancel();
                info!(session = %id, "session cancelled");
                Ok(())
            }
        }
    }

    /// Execute one full turn as an atomic unit under the session lock.
    ///
    /// Verifies the session is active and the actor is the current
    /// player, processes the action, advances the turn pointer, refreshes
    /// every player's score, and finishes the session when the win
    /// condition now holds.
    pub fn play_turn(
        &self,
        id: SessionId,
        user_id: &str,
        request: &TurnRequest,
    ) -> EngineResult<TurnOutcome> {
        let handle = self.handle(id)?;
        let mut session = handle.lock();

        if session.status() != SessionStatus::Active {
            return Err(EngineError::IllegalState {
                expected: "active",
                actual: session.status().as_str(),
            });
        }
        match session.current_player() {
            Some(current) if current.user_id == user_id => {}
            _ => {
                return Err(EngineError::Validation(format!(
                    "it is not the turn of user '{user_id}'"
                )));
            }
        }

        let outcome = TurnProcessor::process_turn(&mut session, user_id, request)?;
        session.advance_turn();
        Self::refresh_scores(&mut session);

        if let Some(winner) = WinDetector::detect(&session) {
            let winner_id = winner.user_id.clone();
            info!(session = %id, winner = %winner_id, "win condition met");
            session.finish(Some(winner_id));
        }

        debug!(
            session = %id,
            user = user_id,
            action = %outcome.action,
            turn = session.turn_count(),
            "turn processed"
        );
        Ok(outcome)
    }

    /// Capture a session view for a viewer.
    pub fn snapshot(&self, id: SessionId, viewer: Option<&str>) -> EngineResult<SessionSnapshot> {
        let handle = self.handle(id)?;
        let session = handle.lock();
        Ok(SessionSnapshot::capture(&session, viewer))
    }

    /// Snapshot every session admitted by the filter, ordered by id.
    #[must_use]
    pub fn list(&self, filter: SessionFilter) -> Vec<SessionSnapshot> {
        let handles: Vec<_> = self.sessions.read().values().cloned().collect();

        let mut snapshots: Vec<_> = handles
            .iter()
            .filter_map(|handle| {
                let session = handle.lock();
                filter
                    .admits(&session)
                    .then(|| SessionSnapshot::capture(&session, None))
            })
            .collect();
        snapshots.sort_by_key(|s| s.id);
        snapshots
    }

    /// Drop a terminal session from the registry.
    pub fn remove(&self, id: SessionId) -> EngineResult<()> {
        let handle = self.handle(id)?;
        {
            let session = handle.lock();
            match session.status() {
                SessionStatus::Finished | SessionStatus::Cancelled => {}
                other => {
                    return Err(EngineError::IllegalState {
                        expected: "finished or cancelled",
                        actual: other.as_str(),
                    });
                }
            }
        }
        self.sessions.write().remove(&id);
        debug!(session = %id, "session removed");
        Ok(())
    }

    fn handle(&self, id: SessionId) -> EngineResult<Arc<Mutex<Session>>> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(EngineError::SessionNotFound(id))
    }

    fn transition(
        &self,
        id: SessionId,
        expected: &'static str,
        apply: fn(&mut Session) -> bool,
    ) -> EngineResult<()> {
        let handle = self.handle(id)?;
        let mut session = handle.lock();

        if !apply(&mut session) {
            return Err(EngineError::IllegalState {
                expected,
                actual: session.status().as_str(),
            });
        }
        debug!(session = %id, status = session.status().as_str(), "lifecycle transition");
        Ok(())
    }

    fn refresh_scores(session: &mut Session) {
        let Some(scoring) = session.rules().rules.scoring.clone() else {
            return;
        };
        let scores: Vec<i64> = session
            .players()
            .iter()
            .map(|player| ScoreCalculator::compute(player, &scoring))
            .collect();
        for (player, score) in session.players_mut().iter_mut().zip(scores) {
            player.set_score(score);
        }
    }
}
