//! Property-based tests for round generation, scoring and history.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chrono::Utc;
use polybasic::core::{StateHistory, StateTransition};
use polybasic::game::round::{self, OPTION_COUNT};
use polybasic::game::{GameContext, GameState};
use polybasic::random::{ScriptedRandom, SeededRandom};
use proptest::prelude::*;

fn unit() -> impl Strategy<Value = f64> {
    0.0..1.0f64
}

fn waiting_for(index: usize, streak: u32) -> GameContext {
    GameContext {
        current_word_index: Some(index),
        option_word_indexes: vec![index; OPTION_COUNT],
        streak,
        ..GameContext::new(1000, 20)
    }
}

#[derive(Clone, Copy, Debug)]
enum Outcome {
    Correct,
    Incorrect,
    Skipped,
}

fn outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        Just(Outcome::Correct),
        Just(Outcome::Incorrect),
        Just(Outcome::Skipped),
    ]
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation(
        items in prop::collection::vec(0..5usize, 0..8),
        draws in prop::collection::vec(unit(), 1..8),
    ) {
        let random = ScriptedRandom::new(draws);
        let mut shuffled = items.clone();
        round::shuffle(&mut shuffled, &random);

        let mut expected = items;
        expected.sort_unstable();
        shuffled.sort_unstable();
        prop_assert_eq!(shuffled, expected);
    }

    #[test]
    fn options_always_include_the_answer(word_count in 1..2000usize, seed in any::<u64>()) {
        let random = SeededRandom::new(seed);
        let context = round::new_round(GameContext::new(word_count, 20), &random).unwrap();
        let index = context.current_word_index.unwrap();

        prop_assert!(index < word_count);
        prop_assert_eq!(context.option_word_indexes.len(), OPTION_COUNT);
        prop_assert!(context.option_word_indexes.contains(&index));
        prop_assert!(context.option_word_indexes.iter().all(|&option| option < word_count));
    }

    #[test]
    fn scoring_depends_only_on_the_index(
        expected in 0..1000usize,
        submitted in 0..1000usize,
        streak in 0..50u32,
    ) {
        let transition = round::score(waiting_for(expected, streak), submitted, Utc::now());

        if submitted == expected {
            prop_assert_eq!(transition.state, GameState::Correct);
            prop_assert_eq!(transition.context.streak, streak + 1);
        } else {
            prop_assert_eq!(transition.state, GameState::Incorrect);
            prop_assert_eq!(transition.context.streak, 0);
        }
        prop_assert_eq!(transition.context.answer_word_index, Some(submitted));
    }

    #[test]
    fn streak_counts_consecutive_correct_answers(
        outcomes in prop::collection::vec(outcome(), 0..40)
    ) {
        let mut context = waiting_for(7, 0);
        let mut run = 0u32;

        for outcome in outcomes {
            context = match outcome {
                Outcome::Correct => {
                    run += 1;
                    round::score(context, 7, Utc::now()).context
                }
                Outcome::Incorrect => {
                    run = 0;
                    round::score(context, 8, Utc::now()).context
                }
                Outcome::Skipped => {
                    run = 0;
                    round::skip(context).context
                }
            };
            prop_assert_eq!(context.streak, run);
        }
    }

    #[test]
    fn round_boundary_every_words_per_round_answers(
        words_per_round in 1..30usize,
        answers in 1..100usize,
    ) {
        let mut context = GameContext {
            words_per_round,
            ..waiting_for(3, 0)
        };
        for _ in 0..answers {
            context = round::score(context, 3, Utc::now()).context;
        }

        let next = round::next_word(context);
        if answers % words_per_round == 0 {
            prop_assert_eq!(next.state, GameState::Stats);
        } else {
            prop_assert_eq!(next.state, GameState::NewWord);
        }
    }

    #[test]
    fn history_never_exceeds_its_limit(limit in 0..20usize, records in 0..60usize) {
        let mut history = StateHistory::with_limit(limit);
        for epoch in 0..records {
            history = history.record(StateTransition {
                from: GameState::NewWord,
                to: GameState::WaitingForAnswer,
                timestamp: Utc::now(),
                epoch: epoch as u64 + 1,
            });
        }

        prop_assert_eq!(history.transitions().len(), records.min(limit));
        if limit > 0 && records > 0 {
            prop_assert_eq!(history.last().map(|t| t.epoch), Some(records as u64));
        }
    }

    #[test]
    fn history_roundtrip_serialization(records in 0..10usize) {
        let mut history = StateHistory::new();
        for epoch in 0..records {
            history = history.record(StateTransition {
                from: GameState::Correct,
                to: GameState::NextWord,
                timestamp: Utc::now(),
                epoch: epoch as u64,
            });
        }

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<GameState> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(history.transitions().len(), deserialized.transitions().len());
        prop_assert_eq!(deserialized.limit(), history.limit());
    }
}
