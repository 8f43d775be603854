//! Property tests over random decks and seeds.

use proptest::prelude::*;

use war_engine::cards::{Card, DeckDefinition, Suit};
use war_engine::core::{AnteDisposition, Seat, WarRules};
use war_engine::rules::{GameSession, GameState};

/// A deck of `values.len()` distinct cards with the given strengths.
fn deck_from_values(values: &[i32]) -> DeckDefinition {
    DeckDefinition::new(
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Card::new(Suit::RANKED[i % 4], format!("c{}", i), v))
            .collect(),
    )
}

fn rules_strategy() -> impl Strategy<Value = WarRules> {
    (0usize..=4, prop::bool::ANY).prop_map(|(ante_count, pooled)| {
        let disposition = if pooled {
            AnteDisposition::Pooled
        } else {
            AnteDisposition::Returned
        };
        WarRules::new()
            .with_ante_count(ante_count)
            .with_ante_disposition(disposition)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deal_parity(values in prop::collection::vec(2i32..=14, 1..60), seed in any::<u64>()) {
        let deck = deck_from_values(&values);
        let session = GameSession::deal(&deck, WarRules::default(), seed).unwrap();

        let p1 = session.piles(Seat::P1).deck_len();
        let p2 = session.piles(Seat::P2).deck_len();
        prop_assert!(p1 >= p2 && p1 - p2 <= 1);
        prop_assert_eq!(p1 + p2, values.len());
        prop_assert_eq!(session.state(), GameState::Running);
    }

    #[test]
    fn prop_conservation(
        values in prop::collection::vec(2i32..=6, 2..40),
        seed in any::<u64>(),
        rules in rules_strategy(),
    ) {
        let deck = deck_from_values(&values);
        let mut session = GameSession::deal(&deck, rules, seed).unwrap();
        let total = values.len();

        for _ in 0..500 {
            let Ok(response) = session.request_next_step() else { break };
            prop_assert!(!response.steps.is_empty());
            prop_assert!(response.steps.len() <= rules.ante_count + 1);
            prop_assert_eq!(session.card_count(), total);

            for step in &response.steps {
                prop_assert!(step.counts().total() <= total);
            }
            // Only the last step of a response may end the game.
            let over: Vec<bool> = response.steps.iter().map(|s| s.is_game_over()).collect();
            prop_assert!(over[..over.len() - 1].iter().all(|&o| !o));
            prop_assert_eq!(over[over.len() - 1], session.is_over());
        }
    }

    #[test]
    fn prop_pool_empty_while_running(
        values in prop::collection::vec(2i32..=5, 2..30),
        seed in any::<u64>(),
    ) {
        let deck = deck_from_values(&values);
        let mut session = GameSession::deal(&deck, WarRules::default(), seed).unwrap();

        for _ in 0..300 {
            if session.request_next_step().is_err() {
                break;
            }
            if session.state() == GameState::Running {
                prop_assert!(session.active_cards().is_empty());
            } else if session.state() == GameState::War {
                prop_assert!(session.active_cards().len() >= 2);
            }
        }
    }

    #[test]
    fn prop_same_seed_same_game(values in prop::collection::vec(2i32..=14, 2..52), seed in any::<u64>()) {
        let deck = deck_from_values(&values);
        let mut a = GameSession::deal(&deck, WarRules::default(), seed).unwrap();
        let mut b = a.clone();

        let summary_a = a.play_out(200);
        let summary_b = b.play_out(200);
        prop_assert_eq!(summary_a, summary_b);
        prop_assert_eq!(a.deck_counts(), b.deck_counts());
    }
}
