//! Catalog of selectable languages.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
}

impl Language {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Ordered list of languages, as shown on the selection screen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Languages that can be learned from `source_id`.
    pub fn selectable<'a>(&'a self, source_id: &'a str) -> impl Iterator<Item = &'a Language> + 'a {
        self.languages
            .iter()
            .filter(move |language| language.id != source_id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|language| language.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LanguageCatalog {
        LanguageCatalog::from_json(
            r#"[
                {"id": "en", "name": "English"},
                {"id": "de", "name": "Deutsch"},
                {"id": "fr", "name": "Français"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn selectable_excludes_source() {
        let catalog = catalog();
        let ids: Vec<&str> = catalog
            .selectable("en")
            .map(|language| language.id.as_str())
            .collect();

        assert_eq!(ids, vec!["de", "fr"]);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = catalog();

        assert!(catalog.contains("fr"));
        assert!(!catalog.contains("xx"));
        assert_eq!(catalog.get("de").map(|l| l.name.as_str()), Some("Deutsch"));
        assert_eq!(catalog.len(), 3);
    }
}
