//! Property tests for the engine's structural invariants.
//!
//! - Deck cardinality: a built deck holds exactly the declared cards
//!   plus whatever the transformations add.
//! - Id uniqueness: every card in one build carries a distinct id.
//! - Turn rotation: the current player index cycles modulo the roster.
//! - Position density: positions are `0..n` after any add/remove mix.
//! - Hand conservation: `deck + hands + discard` is constant across
//!   draw/play/pass sequences.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use cardforge::{
    DeckBuilder, DeckConfig, GameRng, RuleDocument, Session, SessionId, TurnProcessor, TurnRequest,
};

fn deck_config(template_counts: &[usize], jokers: usize, shuffle: bool) -> DeckConfig {
    let cards: Vec<_> = template_counts
        .iter()
        .enumerate()
        .map(|(i, count)| json!({"suit": "s", "rank": format!("r{i}"), "count": count}))
        .collect();
    let mut config = json!({"cards": cards, "shuffle": shuffle});
    if jokers > 0 {
        config["transformations"] = json!([{"type": "add_jokers", "count": jokers}]);
    }
    serde_json::from_value(config).unwrap()
}

fn permissive_rules(deck_size: usize, hand_size: usize, players: usize) -> Arc<RuleDocument> {
    let cards: Vec<_> = (0..deck_size).map(|i| json!({"rank": format!("r{i}")})).collect();
    Arc::new(
        RuleDocument::from_json(json!({
            "name": "property test",
            "description": "",
            "deck_size": deck_size,
            "min_players": 2,
            "max_players": players.max(2),
            "rules_data": {
                "initial_hand_size": hand_size,
                "win_condition": "highest_score",
                "turn_actions": ["play_card", "draw_card", "pass"],
                "deck_configuration": {"cards": cards, "shuffle": true},
                "card_play_rules": {
                    "play_rules": [{"type": "always_playable", "criteria": {}}],
                },
            },
        }))
        .unwrap(),
    )
}

proptest! {
    #[test]
    fn deck_cardinality(
        counts in prop::collection::vec(1usize..5, 1..10),
        jokers in 0usize..4,
        shuffle in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let config = deck_config(&counts, jokers, shuffle);
        let deck = DeckBuilder::build(&config, &mut GameRng::new(seed));

        prop_assert_eq!(deck.len(), counts.iter().sum::<usize>() + jokers);
    }

    #[test]
    fn card_ids_unique(
        counts in prop::collection::vec(1usize..5, 1..10),
        jokers in 0usize..4,
        seed in any::<u64>(),
    ) {
        let config = deck_config(&counts, jokers, true);
        let deck = DeckBuilder::build(&config, &mut GameRng::new(seed));

        let ids: HashSet<u32> = deck.iter().map(|c| c.id.raw()).collect();
        prop_assert_eq!(ids.len(), deck.len());
    }

    #[test]
    fn turn_rotation_cycles(players in 2usize..6, advances in 1usize..40, seed in any::<u64>()) {
        let rules = permissive_rules(players * 3, 2, players);
        let mut session = Session::new(SessionId(1), rules);
        for i in 0..players {
            session.add_player(format!("u{i}"), format!("p{i}"));
        }
        session.start(&mut GameRng::new(seed)).unwrap();

        for step in 1..=advances {
            prop_assert!(session.advance_turn());
            prop_assert_eq!(session.current_player_index(), step % players);
            prop_assert_eq!(session.turn_count() as usize, step + 1);
        }
    }

    #[test]
    fn positions_stay_dense(ops in prop::collection::vec(any::<bool>(), 1..30)) {
        let rules = permissive_rules(40, 2, 6);
        let mut session = Session::new(SessionId(1), rules);
        let mut next_user = 0usize;

        for add in ops {
            if add {
                session.add_player(format!("u{next_user}"), format!("p{next_user}"));
                next_user += 1;
            } else if let Some(first) = session.players().first() {
                let user_id = first.user_id.clone();
                session.remove_player(&user_id);
            }

            let positions: Vec<usize> =
                session.players().iter().map(|p| p.position).collect();
            let expected: Vec<usize> = (0..session.player_count()).collect();
            prop_assert_eq!(positions, expected);
        }
    }

    #[test]
    fn hand_conservation(actions in prop::collection::vec(0u8..3, 1..30), seed in any::<u64>()) {
        let rules = permissive_rules(30, 3, 2);
        let mut session = Session::new(SessionId(1), rules);
        session.add_player("u0", "a");
        session.add_player("u1", "b");
        session.start(&mut GameRng::new(seed)).unwrap();

        let total = session.deck().len()
            + session.players().iter().map(|p| p.hand_size()).sum::<usize>();

        for action in actions {
            let user_id = session.current_player().unwrap().user_id.clone();
            let request = match action {
                0 => {
                    let Some(card) = session
                        .find_player(&user_id)
                        .and_then(|p| p.hand.first())
                        .map(|c| c.id)
                    else {
                        continue;
                    };
                    TurnRequest::with_card("play_card", card)
                }
                1 => TurnRequest::new("draw_card"),
                _ => TurnRequest::new("pass"),
            };

            // Failures (empty deck) must also conserve.
            let _ = TurnProcessor::process_turn(&mut session, &user_id, &request);
            session.advance_turn();

            let current = session.deck().len()
                + session.players().iter().map(|p| p.hand_size()).sum::<usize>()
                + session.state().discard_pile.len();
            prop_assert_eq!(current, total);
        }
    }
}
