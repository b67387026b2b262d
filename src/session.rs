//! A player's session: the app machine plus, while playing, a game.
//!
//! The game driver is created when the app machine enters `playing` and
//! dropped when it leaves. Dropping invalidates the driver first, so a
//! feedback delay still pending resolves as stale.

use crate::app::{self, AppContext, AppDriver, AppEvent, AppState, LanguageCatalog, WordLoader};
use crate::builder::BuildError;
use crate::config::{ConfigError, PolybasicConfig};
use crate::effects::{DispatchOutcome, DriverError, DriverWatch};
use crate::game::{self, GameContext, GameDriver, GameEvent, GameState};
use crate::random::RandomSource;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// What the game screen shows for the current question.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundView {
    pub state: GameState,
    pub prompt: Option<String>,
    pub options: Vec<String>,
    pub streak: u32,
    /// Correct answers in the current round.
    pub correct: usize,
    pub progress: f64,
}

struct ActiveGame {
    /// App epoch at which `playing` was entered.
    app_epoch: u64,
    driver: GameDriver,
}

pub struct Session {
    config: PolybasicConfig,
    catalog: LanguageCatalog,
    random: Arc<dyn RandomSource>,
    app: AppDriver,
    game: Mutex<Option<ActiveGame>>,
}

impl Session {
    pub fn new(
        config: PolybasicConfig,
        loader: Arc<dyn WordLoader>,
        catalog: LanguageCatalog,
        random: Arc<dyn RandomSource>,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let definition = app::definition(&config, loader)?;
        let app = AppDriver::with_history_limit(Arc::new(definition), config.history_limit);

        Ok(Self {
            config,
            catalog,
            random,
            app,
            game: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &PolybasicConfig {
        &self.config
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    /// Languages offered on the selection screen.
    pub fn selectable_languages(&self) -> impl Iterator<Item = &app::Language> {
        self.catalog.selectable(&self.config.source_language_id)
    }

    /// Watch the app machine's run state.
    pub fn subscribe_app(&self) -> DriverWatch<AppState, AppContext> {
        self.app.subscribe()
    }

    /// Snapshot of the app machine.
    pub fn app(&self) -> (AppState, AppContext) {
        self.app.current()
    }

    /// Snapshot of the game machine, if a game is running.
    pub fn game(&self) -> Option<(GameState, GameContext)> {
        self.game_driver().map(|driver| driver.current())
    }

    /// Handle to the running game driver.
    pub fn game_driver(&self) -> Option<GameDriver> {
        self.lock_game()
            .as_ref()
            .map(|active| active.driver.clone())
    }

    /// The current question, resolved to words.
    pub fn round_view(&self) -> Option<RoundView> {
        let (state, context) = self.game()?;
        let (_, words) = self.app();
        let source = &words.source_language_words;
        let target = &words.target_language_words;

        Some(RoundView {
            state,
            prompt: context.prompt_word(source, target).map(str::to_string),
            options: context
                .option_words(source, target)
                .into_iter()
                .map(str::to_string)
                .collect(),
            streak: context.streak,
            correct: context.correct_count(),
            progress: context.round_progress(),
        })
    }

    pub async fn select_language(
        &self,
        language_id: impl Into<String>,
    ) -> Result<DispatchOutcome, SessionError> {
        let language_id = language_id.into();
        if !self.catalog.contains(&language_id) {
            debug!(language = %language_id, "language is not in the catalog");
        }
        self.dispatch_app(AppEvent::SelectLanguage { language_id })
            .await
    }

    pub async fn reset(&self) -> Result<DispatchOutcome, SessionError> {
        self.dispatch_app(AppEvent::Reset).await
    }

    pub async fn retry(&self) -> Result<DispatchOutcome, SessionError> {
        self.dispatch_app(AppEvent::Retry).await
    }

    /// The host navigated back; treated as a reset.
    pub async fn navigate_back(&self) -> Result<DispatchOutcome, SessionError> {
        debug!("back navigation");
        self.reset().await
    }

    pub async fn submit_answer(&self, index: usize) -> Result<DispatchOutcome, SessionError> {
        self.dispatch_game(GameEvent::SubmitAnswer { index }).await
    }

    /// Submit the option behind keyboard shortcut `key` (1 to 3).
    pub async fn submit_option(&self, key: usize) -> Result<DispatchOutcome, SessionError> {
        let index = self
            .game()
            .and_then(|(_, context)| context.option_for_key(key));

        match index {
            Some(index) => self.submit_answer(index).await,
            None => {
                warn!(key, "no option for this key");
                Ok(DispatchOutcome::Ignored)
            }
        }
    }

    pub async fn skip_answer(&self) -> Result<DispatchOutcome, SessionError> {
        self.dispatch_game(GameEvent::SkipAnswer).await
    }

    /// Leave the statistics screen and start the next round.
    pub async fn continue_round(&self) -> Result<DispatchOutcome, SessionError> {
        self.dispatch_game(GameEvent::Continue).await
    }

    async fn dispatch_app(&self, event: AppEvent) -> Result<DispatchOutcome, SessionError> {
        let outcome = settle(self.app.dispatch(event).await)?;
        self.sync_game().await?;
        Ok(outcome)
    }

    async fn dispatch_game(&self, event: GameEvent) -> Result<DispatchOutcome, SessionError> {
        let Some(driver) = self.game_driver() else {
            warn!(event = ?event, "no game running");
            return Ok(DispatchOutcome::Ignored);
        };
        settle(driver.dispatch(event).await)
    }

    /// Start or stop the game to match the app state.
    async fn sync_game(&self) -> Result<(), SessionError> {
        let run = self.app.run_state();

        let started = {
            let mut slot = self.lock_game();
            let current = run.state == AppState::Playing
                && slot
                    .as_ref()
                    .is_some_and(|active| active.app_epoch == run.epoch);
            if current {
                return Ok(());
            }

            if let Some(previous) = slot.take() {
                previous.driver.invalidate();
                debug!(driver = %previous.driver.id(), "game stopped");
            }

            if run.state != AppState::Playing {
                return Ok(());
            }
            if !run.context.has_words() {
                warn!("playing without a word list, no game started");
                return Ok(());
            }

            let definition = game::definition(
                run.context.source_language_words.len(),
                &self.config.game,
                Arc::clone(&self.random),
            )?;
            let driver =
                GameDriver::with_history_limit(Arc::new(definition), self.config.history_limit);
            *slot = Some(ActiveGame {
                app_epoch: run.epoch,
                driver: driver.clone(),
            });
            driver
        };

        debug!(driver = %started.id(), "game started");
        started.start().await?;
        Ok(())
    }

    fn lock_game(&self) -> std::sync::MutexGuard<'_, Option<ActiveGame>> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Input landing on a passive state raced a transition already running.
/// The player cannot act on it, so it is dropped.
fn settle(result: Result<DispatchOutcome, DriverError>) -> Result<DispatchOutcome, SessionError> {
    match result {
        Err(DriverError::PassiveState { state, event }) => {
            warn!(state = %state, event = %event, "input arrived during a transition");
            Ok(DispatchOutcome::Ignored)
        }
        other => Ok(other?),
    }
}
