//! Expands a deck configuration into a concrete sequence of cards.

use crate::cards::{Card, CardId, CardTemplate};
use crate::rng::GameRng;
use crate::rules::{DeckConfig, Transformation};

/// Builds decks from deck configurations.
///
/// Ids are assigned sequentially from 1 and stay monotonic across
/// transformations, so every id in one build is distinct. The builder
/// does not re-check the result against `deck_size`; that invariant
/// belongs to document authoring, not building.
pub struct DeckBuilder;

impl DeckBuilder {
    /// Build a deck: expand templates, apply transformations in document
    /// order, then shuffle unless the config disables it.
    #[must_use]
    pub fn build(config: &DeckConfig, rng: &mut GameRng) -> Vec<Card> {
        let mut deck = Vec::new();
        let mut next_id: u32 = 1;

        for template in &config.cards {
            for _ in 0..template.count {
                deck.push(template.instantiate(CardId::new(next_id)));
                next_id += 1;
            }
        }

        for transformation in &config.transformations {
            next_id = Self::apply(&mut deck, transformation, next_id);
        }

        if config.shuffle {
            rng.shuffle(&mut deck);
        }

        deck
    }

    fn apply(deck: &mut Vec<Card>, transformation: &Transformation, mut next_id: u32) -> u32 {
        match transformation {
            Transformation::DuplicateSubset { criteria, times } => {
                let subset: Vec<Card> =
                    deck.iter().filter(|c| criteria.matches(c)).cloned().collect();
                for _ in 0..*times {
                    for original in &subset {
                        let mut clone = original.clone();
                        clone.id = CardId::new(next_id);
                        next_id += 1;
                        deck.push(clone);
                    }
                }
            }
            Transformation::AddJokers { count, joker } => {
                let template = joker.clone().unwrap_or_else(CardTemplate::joker);
                for _ in 0..*count {
                    deck.push(template.instantiate(CardId::new(next_id)));
                    next_id += 1;
                }
            }
            Transformation::CustomMapping { mapping } => {
                for card in deck.iter_mut() {
                    // Rank keys take precedence over suit keys.
                    if let Some(overrides) =
                        mapping.get(&card.rank).or_else(|| mapping.get(&card.suit))
                    {
                        overrides.apply(card);
                    }
                }
            }
        }
        next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn config(value: serde_json::Value) -> DeckConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_expand_counts() {
        let config = config(json!({
            "cards": [
                {"suit": "hearts", "rank": "2", "count": 3},
                {"suit": "spades", "rank": "3"},
            ],
            "shuffle": false,
        }));

        let deck = DeckBuilder::build(&config, &mut GameRng::new(1));

        assert_eq!(deck.len(), 4);
        assert_eq!(deck[0].suit, "hearts");
        assert_eq!(deck[3].suit, "spades");
        let ids: Vec<u32> = deck.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_duplicate_subset_fresh_ids() {
        let config = config(json!({
            "cards": [
                {"suit": "hearts", "rank": "ace"},
                {"suit": "spades", "rank": "2"},
            ],
            "transformations": [
                {"type": "duplicate_subset", "criteria": {"rank": "ace"}, "times": 2},
            ],
            "shuffle": false,
        }));

        let deck = DeckBuilder::build(&config, &mut GameRng::new(1));

        assert_eq!(deck.len(), 4);
        assert_eq!(deck.iter().filter(|c| c.rank == "ace").count(), 3);

        let ids: HashSet<u32> = deck.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_add_jokers_default_definition() {
        let config = config(json!({
            "cards": [{"suit": "hearts", "rank": "2"}],
            "transformations": [{"type": "add_jokers"}],
            "shuffle": false,
        }));

        let deck = DeckBuilder::build(&config, &mut GameRng::new(1));

        assert_eq!(deck.len(), 3);
        assert_eq!(deck[1].rank, "joker");
        assert_eq!(deck[2].value, 50);
        assert_eq!(deck[2].kind, "wild");
    }

    #[test]
    fn test_add_jokers_custom_definition() {
        let config = config(json!({
            "cards": [{"suit": "hearts", "rank": "2"}],
            "transformations": [
                {"type": "add_jokers", "count": 1,
                 "joker_definition": {"suit": "wild", "rank": "dragon", "value": 100}},
            ],
            "shuffle": false,
        }));

        let deck = DeckBuilder::build(&config, &mut GameRng::new(1));
        assert_eq!(deck[1].rank, "dragon");
        assert_eq!(deck[1].value, 100);
    }

    #[test]
    fn test_custom_mapping_rank_before_suit() {
        let config = config(json!({
            "cards": [
                {"suit": "hearts", "rank": "ace"},
                {"suit": "hearts", "rank": "2"},
            ],
            "transformations": [
                {"type": "custom_mapping", "mapping": {
                    "ace": {"value": 14},
                    "hearts": {"value": 1},
                }},
            ],
            "shuffle": false,
        }));

        let deck = DeckBuilder::build(&config, &mut GameRng::new(1));

        // The ace matches its rank key, not the suit key.
        assert_eq!(deck[0].value, 14);
        assert_eq!(deck[1].value, 1);
    }

    #[test]
    fn test_transformations_apply_in_order() {
        // Jokers added before the duplicate pass get cloned too.
        let config = config(json!({
            "cards": [{"suit": "hearts", "rank": "2"}],
            "transformations": [
                {"type": "add_jokers", "count": 1},
                {"type": "duplicate_subset", "criteria": {"rank": "joker"}},
            ],
            "shuffle": false,
        }));

        let deck = DeckBuilder::build(&config, &mut GameRng::new(1));
        assert_eq!(deck.iter().filter(|c| c.rank == "joker").count(), 2);
    }

    #[test]
    fn test_shuffle_default_and_deterministic() {
        let cards: Vec<_> = (0..20).map(|i| json!({"rank": format!("r{i}")})).collect();
        let shuffled = config(json!({"cards": cards.clone()}));
        let ordered = config(json!({"cards": cards, "shuffle": false}));

        let deck1 = DeckBuilder::build(&shuffled, &mut GameRng::new(5));
        let deck2 = DeckBuilder::build(&shuffled, &mut GameRng::new(5));
        let deck3 = DeckBuilder::build(&ordered, &mut GameRng::new(5));

        assert_eq!(deck1, deck2);
        let ordered_ids: Vec<u32> = deck3.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ordered_ids, (1..=20).collect::<Vec<u32>>());
        assert_ne!(deck1, deck3);
    }
}
