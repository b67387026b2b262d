//! Pure round functions.
//!
//! Every function here maps a context (and draws from a [`RandomSource`])
//! to a new value; the machine definition only wires them to states.

use crate::effects::Transition;
use crate::game::{Answer, GameContext, GameState, WordLanguage};
use crate::random::RandomSource;
use chrono::{DateTime, Utc};

/// Number of candidates offered per round.
pub const OPTION_COUNT: usize = 3;

/// Draw a word index over `[0, len)`, or `None` for an empty list.
pub fn pick_word(len: usize, random: &dyn RandomSource) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(random.index(len))
}

/// Candidates for `index`: the index itself plus two independent draws,
/// in shuffled order.
///
/// Draws may repeat each other or `index`; they are kept as drawn.
pub fn build_options(index: usize, len: usize, random: &dyn RandomSource) -> Vec<usize> {
    let mut options = vec![index];
    for _ in 1..OPTION_COUNT {
        options.push(random.index(len));
    }
    shuffle(&mut options, random);
    options
}

/// Fisher-Yates shuffle, walking down from the last position.
pub fn shuffle<T>(items: &mut [T], random: &dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = random.index(i + 1);
        items.swap(i, j);
    }
}

/// Coin flip for the language the prompt is shown in.
pub fn pick_language(random: &dyn RandomSource) -> WordLanguage {
    if random.next_f64() > 0.5 {
        WordLanguage::Source
    } else {
        WordLanguage::Target
    }
}

/// Set up the next question, or `None` when there is no word to pick.
pub fn new_round(context: GameContext, random: &dyn RandomSource) -> Option<GameContext> {
    let index = pick_word(context.word_count, random)?;
    let option_word_indexes = build_options(index, context.word_count, random);
    let current_word_language = pick_language(random);

    Some(GameContext {
        current_word_index: Some(index),
        current_word_language,
        option_word_indexes,
        answer_word_index: None,
        ..context
    })
}

/// Score a submitted answer and record it.
pub fn score(
    context: GameContext,
    index: usize,
    now: DateTime<Utc>,
) -> Transition<GameState, GameContext> {
    let correct = context.current_word_index == Some(index);
    let streak = if correct { context.streak + 1 } else { 0 };

    let mut answers = context.answers;
    if let Some(expected) = context.current_word_index {
        answers.push(Answer {
            language: context.current_word_language,
            expected,
            actual: index,
            time: now,
        });
    }

    let state = if correct {
        GameState::Correct
    } else {
        GameState::Incorrect
    };

    Transition::new(
        state,
        GameContext {
            answer_word_index: Some(index),
            streak,
            answers,
            ..context
        },
    )
}

/// Skip the current word. Nothing is recorded; the streak resets.
pub fn skip(context: GameContext) -> Transition<GameState, GameContext> {
    Transition::new(
        GameState::Skipped,
        GameContext {
            answer_word_index: None,
            streak: 0,
            ..context
        },
    )
}

/// After feedback: statistics on a round boundary, else the next word.
pub fn next_word(context: GameContext) -> Transition<GameState, GameContext> {
    let state = if context.round_complete() {
        GameState::Stats
    } else {
        GameState::NewWord
    };
    Transition::new(state, context)
}

/// Acknowledge the statistics and start a fresh round.
pub fn continue_round(context: GameContext) -> Transition<GameState, GameContext> {
    Transition::new(
        GameState::NewWord,
        GameContext {
            answers: Vec::new(),
            ..context
        },
    )
}
