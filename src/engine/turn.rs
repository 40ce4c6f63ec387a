//! Turn processing: validate and execute one player action.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::error::{EngineError, EngineResult};
use crate::rules::{CustomAction, RequirementCheck};
use crate::session::Session;

use super::effects::{EffectList, EffectResolver};
use super::legality;

/// A player-submitted turn action request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnRequest {
    pub action: String,
    #[serde(default)]
    pub card_id: Option<CardId>,
    #[serde(default)]
    pub target_player_id: Option<String>,
    #[serde(default)]
    pub target_suit: Option<String>,
    #[serde(default)]
    pub target_rank: Option<String>,
}

impl TurnRequest {
    /// A request with no card argument (`draw_card`, `pass`, custom).
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            card_id: None,
            target_player_id: None,
            target_suit: None,
            target_rank: None,
        }
    }

    /// A request naming a card (`play_card`, `discard`).
    #[must_use]
    pub fn with_card(action: impl Into<String>, card_id: CardId) -> Self {
        Self { card_id: Some(card_id), ..Self::new(action) }
    }
}

/// The structured result of a processed turn.
#[derive(Clone, Debug, Serialize)]
pub struct TurnOutcome {
    /// What happened: `card_played`, `card_drawn`, `passed`,
    /// `card_discarded`, or the custom action's name.
    pub action: String,
    /// The card involved, if any.
    pub card: Option<Card>,
    /// Acting player's username.
    pub player: String,
    /// Special effects triggered by the action, in declaration order.
    pub effects: EffectList,
}

/// Validates and executes turn actions against a session.
///
/// Every branch validates fully before mutating anything: an error
/// return means the session is exactly as it was.
pub struct TurnProcessor;

impl TurnProcessor {
    /// Process one action for the acting player.
    ///
    /// The caller is responsible for lifecycle preconditions (session
    /// active, acting player is the current player); the processor
    /// re-validates that the action itself is permitted.
    pub fn process_turn(
        session: &mut Session,
        user_id: &str,
        request: &TurnRequest,
    ) -> EngineResult<TurnOutcome> {
        if session.find_player(user_id).is_none() {
            return Err(EngineError::PlayerNotFound(user_id.to_owned()));
        }
        if !session.rules().allows_action(&request.action) {
            return Err(EngineError::ActionNotAllowed(request.action.clone()));
        }

        match request.action.as_str() {
            "play_card" => Self::play_card(session, user_id, request),
            "draw_card" => Self::draw_card(session, user_id),
            "pass" => Self::pass(session, user_id),
            "discard" => Self::discard(session, user_id, request),
            custom => Self::custom_action(session, user_id, custom),
        }
    }

    fn play_card(
        session: &mut Session,
        user_id: &str,
        request: &TurnRequest,
    ) -> EngineResult<TurnOutcome> {
        let card_id = Self::required_card_id(request)?;
        let (username, card) = Self::card_in_hand(session, user_id, card_id)?;

        let play_rules = &session.rules().rules.card_play_rules;
        if !legality::can_play(&card, session.state(), play_rules) {
            return Err(EngineError::Validation(format!(
                "card {} cannot be played",
                card.display_name
            )));
        }

        // Validation complete; mutate.
        Self::take_from_hand(session, user_id, card_id);
        session.push_discard(card.clone());
        session.state_mut().last_action = format!("{username} played {}", card.display_name);

        let effects = EffectResolver::resolve(session, &card);

        Ok(TurnOutcome { action: "card_played".into(), card: Some(card), player: username, effects })
    }

    fn draw_card(session: &mut Session, user_id: &str) -> EngineResult<TurnOutcome> {
        if session.deck().is_empty() {
            return Err(EngineError::DeckEmpty);
        }

        let card = match session.draw_from_deck() {
            Some(card) => card,
            None => return Err(EngineError::DeckEmpty),
        };
        let username = match session.find_player_mut(user_id) {
            Some(player) => {
                player.draw(card.clone());
                player.username.clone()
            }
            // Presence was checked in process_turn.
            None => return Err(EngineError::PlayerNotFound(user_id.to_owned())),
        };
        session.state_mut().last_action = format!("{username} drew a card");

        Ok(TurnOutcome {
            action: "card_drawn".into(),
            card: None,
            player: username,
            effects: EffectList::new(),
        })
    }

    fn pass(session: &mut Session, user_id: &str) -> EngineResult<TurnOutcome> {
        let username = Self::username(session, user_id)?;
        if let Some(player) = session.find_player_mut(user_id) {
            player.touch();
        }
        session.state_mut().last_action = format!("{username} passed");

        Ok(TurnOutcome {
            action: "passed".into(),
            card: None,
            player: username,
            effects: EffectList::new(),
        })
    }

    fn discard(
        session: &mut Session,
        user_id: &str,
        request: &TurnRequest,
    ) -> EngineResult<TurnOutcome> {
        let card_id = Self::required_card_id(request)?;
        let (username, card) = Self::card_in_hand(session, user_id, card_id)?;

        // No legality check and no effects for a plain discard.
        Self::take_from_hand(session, user_id, card_id);
        session.push_discard(card.clone());
        session.state_mut().last_action = format!("{username} discarded {}", card.display_name);

        Ok(TurnOutcome {
            action: "card_discarded".into(),
            card: Some(card),
            player: username,
            effects: EffectList::new(),
        })
    }

    fn custom_action(session: &mut Session, user_id: &str, name: &str) -> EngineResult<TurnOutcome> {
        let Some(config) = session.rules().custom_action(name).cloned() else {
            return Err(EngineError::UnknownAction(name.to_owned()));
        };
        let username = Self::username(session, user_id)?;

        Self::check_requirements(session, user_id, &config)?;

        // Requirements met; mutate.
        session.state_mut().apply_changes(&config.state_changes);
        session.state_mut().last_action = config
            .message
            .clone()
            .unwrap_or_else(|| format!("{username} performed {name}"));
        if let Some(player) = session.find_player_mut(user_id) {
            player.touch();
        }

        Ok(TurnOutcome {
            action: name.to_owned(),
            card: None,
            player: username,
            effects: EffectList::new(),
        })
    }

    fn check_requirements(
        session: &Session,
        user_id: &str,
        config: &CustomAction,
    ) -> EngineResult<()> {
        let player = session
            .find_player(user_id)
            .ok_or_else(|| EngineError::PlayerNotFound(user_id.to_owned()))?;

        for requirement in &config.requirements {
            let met = match &requirement.check {
                RequirementCheck::HasCard { criteria } => {
                    player.hand.iter().any(|card| criteria.matches(card))
                }
                RequirementCheck::HandSize { minimum } => player.hand.len() >= *minimum,
                RequirementCheck::GameState { property, value } => {
                    session.state().get(property).as_ref() == Some(value)
                }
            };
            if !met {
                return Err(EngineError::RequirementNotMet(requirement.describe()));
            }
        }
        Ok(())
    }

    // === Shared helpers ===

    fn required_card_id(request: &TurnRequest) -> EngineResult<CardId> {
        request
            .card_id
            .ok_or_else(|| EngineError::Validation("card_id is required".into()))
    }

    /// Resolve username and a clone of the named card, without mutating.
    fn card_in_hand(
        session: &Session,
        user_id: &str,
        card_id: CardId,
    ) -> EngineResult<(String, Card)> {
        let player = session
            .find_player(user_id)
            .ok_or_else(|| EngineError::PlayerNotFound(user_id.to_owned()))?;
        let card = player
            .find_card(card_id)
            .cloned()
            .ok_or_else(|| EngineError::Validation("card not found in player's hand".into()))?;
        Ok((player.username.clone(), card))
    }

    fn take_from_hand(session: &mut Session, user_id: &str, card_id: CardId) {
        if let Some(player) = session.find_player_mut(user_id) {
            player.remove_card(card_id);
        }
    }

    fn username(session: &Session, user_id: &str) -> EngineResult<String> {
        session
            .find_player(user_id)
            .map(|p| p.username.clone())
            .ok_or_else(|| EngineError::PlayerNotFound(user_id.to_owned()))
    }
}
