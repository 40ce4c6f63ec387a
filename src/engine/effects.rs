//! Special-effect resolution.
//!
//! After a legal card play, every declared effect whose criteria match
//! the played card fires, in declaration order, with no short-circuit.

use serde::Serialize;
use smallvec::SmallVec;

use crate::cards::Card;
use crate::rules::{EffectKind, TargetSet};
use crate::session::Session;

/// One triggered effect, reported in the turn outcome.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EffectDescriptor {
    #[serde(flatten)]
    pub effect: EffectKind,
    pub message: String,
}

/// Triggered-effect list; one play rarely triggers more than a couple.
pub type EffectList = SmallVec<[EffectDescriptor; 2]>;

/// Resolves rule-declared special effects against a played card.
pub struct EffectResolver;

impl EffectResolver {
    /// Match and apply every triggered effect, returning descriptors of
    /// what fired.
    pub fn resolve(session: &mut Session, played: &Card) -> EffectList {
        let rules = session.rules().clone();
        let mut applied = EffectList::new();

        for declared in &rules.rules.card_play_rules.special_effects {
            if !declared.criteria.matches(played) {
                continue;
            }

            Self::apply(session, &declared.effect);
            Self::record(session, &declared.effect);

            let message = declared
                .message
                .clone()
                .unwrap_or_else(|| "Special effect triggered".into());
            applied.push(EffectDescriptor { effect: declared.effect.clone(), message });
        }

        applied
    }

    fn apply(session: &mut Session, effect: &EffectKind) {
        match effect {
            EffectKind::SkipPlayer => {
                // One extra advancement; the caller's normal advancement
                // then lands past the skipped player.
                session.advance_turn();
            }
            EffectKind::ReverseDirection => {
                let flipped = session.state().direction.flipped();
                session.state_mut().direction = flipped;
            }
            EffectKind::ForceDraw { target, count } => {
                for position in Self::targets(session, *target) {
                    for _ in 0..*count {
                        if !session.draw_into_hand(position) {
                            return; // deck exhausted, partial application stands
                        }
                    }
                }
            }
            EffectKind::CustomEffect { state_changes } => {
                session.state_mut().apply_changes(state_changes);
            }
        }
    }

    /// Resolve a target set to player positions, in position order
    /// starting from the player after the current one.
    fn targets(session: &Session, target: TargetSet) -> Vec<usize> {
        let count = session.player_count();
        if count == 0 {
            return Vec::new();
        }
        let current = session.current_player_index();

        match target {
            TargetSet::NextPlayer => vec![(current + 1) % count],
            TargetSet::AllOtherPlayers => (1..count).map(|i| (current + i) % count).collect(),
            TargetSet::AllPlayers => (0..count).map(|i| (current + i) % count).collect(),
        }
    }

    fn record(session: &mut Session, effect: &EffectKind) {
        if let Ok(serde_json::Value::Object(map)) = serde_json::to_value(effect) {
            if let Some(serde_json::Value::String(tag)) = map.get("type") {
                let data = map.get("data").cloned().unwrap_or_default();
                let tag = tag.clone();
                session.state_mut().record_special(&tag, data);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;
    use crate::rules::RuleDocument;
    use crate::session::{Direction, SessionId};
    use serde_json::json;
    use std::sync::Arc;

    fn rules_with_effects(effects: serde_json::Value) -> Arc<RuleDocument> {
        let cards: Vec<_> = (0..30).map(|i| json!({"rank": format!("{i}"), "value": i})).collect();
        Arc::new(
            RuleDocument::from_json(json!({
                "name": "effects test",
                "description": "",
                "deck_size": 30,
                "min_players": 2,
                "max_players": 4,
                "rules_data": {
                    "initial_hand_size": 3,
                    "win_condition": "first_to_empty_hand",
                    "turn_actions": ["play_card"],
                    "deck_configuration": {"cards": cards, "shuffle": false},
                    "card_play_rules": {"special_effects": effects},
                },
            }))
            .unwrap(),
        )
    }

    fn active_session(rules: Arc<RuleDocument>, players: usize) -> Session {
        let mut session = Session::new(SessionId(1), rules);
        for i in 0..players {
            session.add_player(format!("u{i}"), format!("Player {i}"));
        }
        session.start(&mut GameRng::new(42)).unwrap();
        session
    }

    fn played(rank: &str) -> Card {
        let template: crate::cards::CardTemplate =
            serde_json::from_value(json!({"rank": rank})).unwrap();
        template.instantiate(crate::cards::CardId::new(999))
    }

    #[test]
    fn test_no_matching_effects() {
        let rules = rules_with_effects(json!([
            {"type": "skip_player", "criteria": {"rank": "7"}},
        ]));
        let mut session = active_session(rules, 2);

        let effects = EffectResolver::resolve(&mut session, &played("3"));
        assert!(effects.is_empty());
        assert_eq!(session.current_player_index(), 0);
    }

    #[test]
    fn test_skip_player_advances_once() {
        let rules = rules_with_effects(json!([
            {"type": "skip_player", "criteria": {"rank": "7"}, "message": "Skipped!"},
        ]));
        let mut session = active_session(rules, 3);

        let effects = EffectResolver::resolve(&mut session, &played("7"));

        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].message, "Skipped!");
        assert_eq!(session.current_player_index(), 1);
    }

    #[test]
    fn test_reverse_direction() {
        let rules = rules_with_effects(json!([
            {"type": "reverse_direction", "criteria": {"rank": "9"}},
        ]));
        let mut session = active_session(rules, 2);

        EffectResolver::resolve(&mut session, &played("9"));
        assert_eq!(session.state().direction, Direction::Counterclockwise);

        EffectResolver::resolve(&mut session, &played("9"));
        assert_eq!(session.state().direction, Direction::Clockwise);
    }

    #[test]
    fn test_force_draw_next_player() {
        let rules = rules_with_effects(json!([
            {"type": "force_draw", "criteria": {"rank": "2"},
             "data": {"target": "next_player", "count": 2}},
        ]));
        let mut session = active_session(rules, 2);
        let deck_before = session.deck().len();

        EffectResolver::resolve(&mut session, &played("2"));

        assert_eq!(session.players()[1].hand_size(), 5);
        assert_eq!(session.players()[0].hand_size(), 3);
        assert_eq!(session.deck().len(), deck_before - 2);
    }

    #[test]
    fn test_force_draw_stops_on_empty_deck() {
        let rules = rules_with_effects(json!([
            {"type": "force_draw", "criteria": {"rank": "2"},
             "data": {"target": "all_other_players", "count": 2}},
        ]));
        // 3 players x 3-card hands leaves 30 - 9 = 21 in deck; drain to 1.
        let mut session = active_session(rules, 3);
        while session.deck().len() > 1 {
            session.draw_from_deck();
        }

        let effects = EffectResolver::resolve(&mut session, &played("2"));

        // One card distributed to the first target, then silence.
        assert_eq!(effects.len(), 1);
        assert_eq!(session.deck().len(), 0);
        assert_eq!(session.players()[1].hand_size(), 4);
        assert_eq!(session.players()[2].hand_size(), 3);
    }

    #[test]
    fn test_custom_effect_merges_state() {
        let rules = rules_with_effects(json!([
            {"type": "custom_effect", "criteria": {"rank": "8"},
             "data": {"state_changes": {"wild_suit": "hearts"}}},
        ]));
        let mut session = active_session(rules, 2);

        EffectResolver::resolve(&mut session, &played("8"));
        assert_eq!(session.state().custom["wild_suit"], json!("hearts"));
    }

    #[test]
    fn test_multiple_effects_all_apply() {
        let rules = rules_with_effects(json!([
            {"type": "skip_player", "criteria": {"rank": "7"}},
            {"type": "reverse_direction", "criteria": {"rank": "7"}},
        ]));
        let mut session = active_session(rules, 3);

        let effects = EffectResolver::resolve(&mut session, &played("7"));

        assert_eq!(effects.len(), 2);
        assert_eq!(session.current_player_index(), 1);
        assert_eq!(session.state().direction, Direction::Counterclockwise);
    }

    #[test]
    fn test_applied_effects_recorded() {
        let rules = rules_with_effects(json!([
            {"type": "skip_player", "criteria": {"rank": "7"}},
        ]));
        let mut session = active_session(rules, 2);

        EffectResolver::resolve(&mut session, &played("7"));
        assert!(session.state().special_conditions.contains_key("skip_player"));
    }
}
