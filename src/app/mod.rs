//! Screen-level flow: language selection, word loading, play and errors.

pub mod languages;
pub mod loader;
pub mod machine;

pub use languages::{Language, LanguageCatalog};
pub use loader::{DirectoryWordLoader, LoadError, StaticWordLoader, WordLoader};
pub use machine::{definition, AppDefinition, AppDriver};

use crate::core::Event;
use crate::state_enum;
use serde::{Deserialize, Serialize};

state_enum! {
    pub enum AppState {
        SelectLanguage => "select-language",
        LoadWords => "load-words",
        Playing => "playing",
        Error => "error",
    }
    error: [Error]
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AppEvent {
    SelectLanguage { language_id: String },
    Reset,
    Retry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppEventKind {
    SelectLanguage,
    Reset,
    Retry,
}

impl Event for AppEvent {
    type Kind = AppEventKind;

    fn kind(&self) -> AppEventKind {
        match self {
            Self::SelectLanguage { .. } => AppEventKind::SelectLanguage,
            Self::Reset => AppEventKind::Reset,
            Self::Retry => AppEventKind::Retry,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppContext {
    pub source_language_id: String,
    pub target_language_id: Option<String>,
    pub source_language_words: Vec<String>,
    pub target_language_words: Vec<String>,
}

impl AppContext {
    pub fn new(source_language_id: impl Into<String>) -> Self {
        Self {
            source_language_id: source_language_id.into(),
            ..Self::default()
        }
    }

    /// Back to the selection screen: only the source language survives.
    pub fn cleared(self) -> Self {
        Self::new(self.source_language_id)
    }

    pub fn has_words(&self) -> bool {
        !self.source_language_words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    #[test]
    fn error_state_is_flagged() {
        assert!(AppState::Error.is_error());
        assert!(!AppState::Playing.is_error());
        assert_eq!(AppState::LoadWords.name(), "load-words");
    }

    #[test]
    fn select_language_event_round_trips_through_json() {
        let event: AppEvent =
            serde_json::from_str(r#"{"type":"select-language","language_id":"de"}"#).unwrap();

        assert_eq!(
            event,
            AppEvent::SelectLanguage {
                language_id: "de".to_string()
            }
        );
        assert_eq!(event.kind(), AppEventKind::SelectLanguage);
    }

    #[test]
    fn cleared_keeps_source_language() {
        let context = AppContext {
            target_language_id: Some("de".to_string()),
            source_language_words: vec!["one".to_string()],
            target_language_words: vec!["eins".to_string()],
            ..AppContext::new("en")
        };

        assert!(context.has_words());
        assert_eq!(context.cleared(), AppContext::new("en"));
    }
}
