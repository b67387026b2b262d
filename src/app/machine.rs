//! App machine definition.

use crate::app::loader::{LoadError, WordLoader};
use crate::app::{AppContext, AppEvent, AppEventKind, AppState};
use crate::builder::{
    ActiveStateBuilder, BuildError, DefinitionBuilder, StateMachineDefinition,
};
use crate::config::PolybasicConfig;
use crate::effects::{Driver, Transition};
use std::sync::Arc;
use tracing::{error, info, warn};

pub type AppDefinition = StateMachineDefinition<AppState, AppEvent, AppContext>;
pub type AppDriver = Driver<AppState, AppEvent, AppContext>;

type AppActive = ActiveStateBuilder<AppState, AppEvent, AppContext>;

/// Build the app machine.
///
/// `load-words` fetches the source and target lists concurrently; any
/// failure lands in `error` with no lists stored.
pub fn definition(
    config: &PolybasicConfig,
    loader: Arc<dyn WordLoader>,
) -> Result<AppDefinition, BuildError> {
    DefinitionBuilder::<AppState, AppEvent, AppContext>::new()
        .initial(AppState::SelectLanguage)
        .context(AppContext::new(config.source_language_id.clone()))
        .active(
            AppState::SelectLanguage,
            AppActive::new().on_sync(AppEventKind::SelectLanguage, select_language),
        )
        .passive(AppState::LoadWords, move |context: AppContext| {
            let loader = Arc::clone(&loader);
            async move { load_words(loader.as_ref(), context).await }
        })
        .active(
            AppState::Playing,
            AppActive::new().on_sync(AppEventKind::Reset, back_to_selection),
        )
        .active(
            AppState::Error,
            AppActive::new()
                .on_sync(AppEventKind::Retry, back_to_selection)
                .on_sync(AppEventKind::Reset, back_to_selection),
        )
        .build()
}

fn select_language(context: AppContext, event: AppEvent) -> Transition<AppState, AppContext> {
    match event {
        AppEvent::SelectLanguage { language_id } => Transition::new(
            AppState::LoadWords,
            AppContext {
                target_language_id: Some(language_id),
                ..context
            },
        ),
        other => {
            warn!(event = ?other, "selection handler received another event");
            Transition::new(AppState::SelectLanguage, context)
        }
    }
}

fn back_to_selection(context: AppContext, _: AppEvent) -> Transition<AppState, AppContext> {
    Transition::new(AppState::SelectLanguage, context.cleared())
}

async fn load_words(
    loader: &dyn WordLoader,
    context: AppContext,
) -> Transition<AppState, AppContext> {
    let target = context.target_language_id.clone().unwrap_or_default();

    match load_pair(loader, &context.source_language_id, &target).await {
        Ok((source_words, target_words)) => {
            info!(
                source = %context.source_language_id,
                target = %target,
                words = source_words.len(),
                "word lists loaded"
            );
            Transition::new(
                AppState::Playing,
                AppContext {
                    source_language_words: source_words,
                    target_language_words: target_words,
                    ..context
                },
            )
        }
        Err(cause) => {
            error!(
                source = %context.source_language_id,
                target = %target,
                error = %cause,
                "failed to load word lists"
            );
            Transition::new(
                AppState::Error,
                AppContext {
                    source_language_words: Vec::new(),
                    target_language_words: Vec::new(),
                    ..context
                },
            )
        }
    }
}

/// Load both lists concurrently. Either failure fails the pair.
pub async fn load_pair(
    loader: &dyn WordLoader,
    source_id: &str,
    target_id: &str,
) -> Result<(Vec<String>, Vec<String>), LoadError> {
    let (source, target) = futures::try_join!(loader.load(source_id), loader.load(target_id))?;

    for (language_id, words) in [(source_id, &source), (target_id, &target)] {
        if words.is_empty() {
            return Err(LoadError::Empty {
                language_id: language_id.to_string(),
            });
        }
    }

    Ok((source, target))
}
