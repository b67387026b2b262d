//! Game machine definition.

use crate::builder::{
    after, ActiveStateBuilder, BuildError, DefinitionBuilder, StateMachineDefinition,
};
use crate::config::GameConfig;
use crate::effects::{Driver, Transition};
use crate::game::round;
use crate::game::{GameContext, GameEvent, GameEventKind, GameState};
use crate::random::RandomSource;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, warn};

pub type GameDefinition = StateMachineDefinition<GameState, GameEvent, GameContext>;
pub type GameDriver = Driver<GameState, GameEvent, GameContext>;

type GameActive = ActiveStateBuilder<GameState, GameEvent, GameContext>;

/// Build the game machine over word lists of length `word_count`.
///
/// ```text
/// new-word -> waiting-for-answer -> correct | incorrect | skipped
///          ^                                     |  (feedback delay)
///          |                                  next-word
///          +------------- continue ---- stats <--+ (round boundary)
/// ```
pub fn definition(
    word_count: usize,
    config: &GameConfig,
    random: Arc<dyn RandomSource>,
) -> Result<GameDefinition, BuildError> {
    let delay = config.feedback_delay();

    DefinitionBuilder::<GameState, GameEvent, GameContext>::new()
        .initial(GameState::NewWord)
        .context(GameContext::new(word_count, config.words_per_round))
        .passive_sync(GameState::NewWord, move |context: GameContext| {
            match round::new_round(context.clone(), random.as_ref()) {
                Some(next) => Transition::new(GameState::WaitingForAnswer, next),
                None => {
                    error!(
                        word_count = context.word_count,
                        "cannot pick a word from an empty word list"
                    );
                    Transition::new(GameState::NewWord, context)
                }
            }
        })
        .active(
            GameState::WaitingForAnswer,
            GameActive::new()
                .on_sync(GameEventKind::SubmitAnswer, |context: GameContext, event| {
                    match event {
                        GameEvent::SubmitAnswer { index } => {
                            round::score(context, index, Utc::now())
                        }
                        other => {
                            warn!(event = ?other, "submit handler received another event");
                            Transition::new(GameState::WaitingForAnswer, context)
                        }
                    }
                })
                .on_sync(GameEventKind::SkipAnswer, |context: GameContext, _| {
                    round::skip(context)
                }),
        )
        .passive_handler(GameState::Correct, after(delay, GameState::NextWord))
        .passive_handler(GameState::Incorrect, after(delay, GameState::NextWord))
        .passive_handler(GameState::Skipped, after(delay, GameState::NextWord))
        .passive_sync(GameState::NextWord, round::next_word)
        .active(
            GameState::Stats,
            GameActive::new().on_sync(GameEventKind::Continue, |context: GameContext, _| {
                round::continue_round(context)
            }),
        )
        .build()
}
