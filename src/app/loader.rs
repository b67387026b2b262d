//! Word list loaders.
//!
//! A word list is an ordered JSON array of strings. Lists of different
//! languages are aligned by position: entry `i` of every list names the
//! same concept.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No word list for language '{language_id}'")]
    NotFound { language_id: String },

    #[error("Failed to read word list for '{language_id}': {source}")]
    Io {
        language_id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed word list for '{language_id}': {source}")]
    Malformed {
        language_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Word list for '{language_id}' is empty")]
    Empty { language_id: String },
}

/// Fetches the word list of one language.
pub trait WordLoader: Send + Sync {
    fn load<'a>(&'a self, language_id: &'a str) -> BoxFuture<'a, Result<Vec<String>, LoadError>>;
}

/// Word lists held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticWordLoader {
    lists: HashMap<String, Vec<String>>,
}

impl StaticWordLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language<I, W>(mut self, language_id: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.insert(language_id, words);
        self
    }

    pub fn insert<I, W>(&mut self, language_id: impl Into<String>, words: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.lists
            .insert(language_id.into(), words.into_iter().map(Into::into).collect());
    }
}

impl WordLoader for StaticWordLoader {
    fn load<'a>(&'a self, language_id: &'a str) -> BoxFuture<'a, Result<Vec<String>, LoadError>> {
        let result = self
            .lists
            .get(language_id)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                language_id: language_id.to_string(),
            });
        futures::future::ready(result).boxed()
    }
}

/// Reads `<root>/<language_id>.json`.
#[derive(Clone, Debug)]
pub struct DirectoryWordLoader {
    root: PathBuf,
}

impl DirectoryWordLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, language_id: &str) -> Option<PathBuf> {
        let valid = !language_id.is_empty()
            && language_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| self.root.join(format!("{language_id}.json")))
    }

    async fn read_list(&self, language_id: &str) -> Result<Vec<String>, LoadError> {
        let path = self
            .path_for(language_id)
            .ok_or_else(|| LoadError::NotFound {
                language_id: language_id.to_string(),
            })?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound {
                    language_id: language_id.to_string(),
                })
            }
            Err(source) => {
                return Err(LoadError::Io {
                    language_id: language_id.to_string(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| LoadError::Malformed {
            language_id: language_id.to_string(),
            source,
        })
    }
}

impl WordLoader for DirectoryWordLoader {
    fn load<'a>(&'a self, language_id: &'a str) -> BoxFuture<'a, Result<Vec<String>, LoadError>> {
        self.read_list(language_id).boxed()
    }
}
