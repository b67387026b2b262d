//! The question/answer cycle of one game.
//!
//! A round shows a prompt word in one language and three candidate
//! translations from the other. The machine scores the chosen candidate,
//! pauses on feedback, and after `words_per_round` answers shows the
//! round statistics.

pub mod machine;
pub mod round;

pub use machine::{definition, GameDefinition, GameDriver};

use crate::core::Event;
use crate::state_enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

state_enum! {
    pub enum GameState {
        NewWord => "new-word",
        WaitingForAnswer => "waiting-for-answer",
        Correct => "correct",
        Incorrect => "incorrect",
        Skipped => "skipped",
        NextWord => "next-word",
        Stats => "stats",
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    SubmitAnswer { index: usize },
    SkipAnswer,
    Continue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameEventKind {
    SubmitAnswer,
    SkipAnswer,
    Continue,
}

impl Event for GameEvent {
    type Kind = GameEventKind;

    fn kind(&self) -> GameEventKind {
        match self {
            Self::SubmitAnswer { .. } => GameEventKind::SubmitAnswer,
            Self::SkipAnswer => GameEventKind::SkipAnswer,
            Self::Continue => GameEventKind::Continue,
        }
    }
}

/// Which word list a word is shown from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordLanguage {
    #[default]
    Source,
    Target,
}

impl WordLanguage {
    /// The list the answer candidates come from.
    pub fn other(self) -> Self {
        match self {
            Self::Source => Self::Target,
            Self::Target => Self::Source,
        }
    }

    fn pick<'a>(self, source: &'a [String], target: &'a [String]) -> &'a [String] {
        match self {
            Self::Source => source,
            Self::Target => target,
        }
    }
}

/// One submitted answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Language the prompt was shown in.
    pub language: WordLanguage,
    pub expected: usize,
    pub actual: usize,
    pub time: DateTime<Utc>,
}

impl Answer {
    pub fn is_correct(&self) -> bool {
        self.expected == self.actual
    }
}

/// Context of the game machine.
///
/// Word indexes point into both word lists, which are aligned by meaning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameContext {
    /// Length of the word lists the indexes are drawn over.
    pub word_count: usize,
    pub current_word_index: Option<usize>,
    pub current_word_language: WordLanguage,
    /// Candidate indexes in display order; also the 1/2/3 key order.
    pub option_word_indexes: Vec<usize>,
    /// The chosen index; unset before an answer and after a skip.
    pub answer_word_index: Option<usize>,
    /// Consecutive correct answers.
    pub streak: u32,
    /// Answers of the current round, oldest first.
    pub answers: Vec<Answer>,
    pub words_per_round: usize,
}

impl GameContext {
    pub fn new(word_count: usize, words_per_round: usize) -> Self {
        Self {
            word_count,
            current_word_index: None,
            current_word_language: WordLanguage::Source,
            option_word_indexes: Vec::new(),
            answer_word_index: None,
            streak: 0,
            answers: Vec::new(),
            words_per_round,
        }
    }

    /// The prompt shown for the current word.
    pub fn prompt_word<'a>(&self, source: &'a [String], target: &'a [String]) -> Option<&'a str> {
        let index = self.current_word_index?;
        self.current_word_language
            .pick(source, target)
            .get(index)
            .map(String::as_str)
    }

    /// The candidate translations, in display order.
    pub fn option_words<'a>(&self, source: &'a [String], target: &'a [String]) -> Vec<&'a str> {
        let words = self.current_word_language.other().pick(source, target);
        self.option_word_indexes
            .iter()
            .filter_map(|&index| words.get(index).map(String::as_str))
            .collect()
    }

    /// Word index behind keyboard shortcut `key` (1-based).
    pub fn option_for_key(&self, key: usize) -> Option<usize> {
        key.checked_sub(1)
            .and_then(|position| self.option_word_indexes.get(position))
            .copied()
    }

    /// Fraction of the round answered so far.
    pub fn round_progress(&self) -> f64 {
        if self.words_per_round == 0 {
            return 0.0;
        }
        self.answers.len() as f64 / self.words_per_round as f64
    }

    /// Whether the answers so far complete a round.
    pub fn round_complete(&self) -> bool {
        self.words_per_round > 0
            && !self.answers.is_empty()
            && self.answers.len() % self.words_per_round == 0
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_correct()).count()
    }
}
