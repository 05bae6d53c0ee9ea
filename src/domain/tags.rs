//! Ordered, de-duplicated list of short lowercase tags.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::FormConfig;
use crate::utils::char_len;

/// A normalized tag: trimmed, lowercase, non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a tag is refused. Each maps to the title/body pair shown to the
/// user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("Por favor ingresa una etiqueta válida")]
    Empty,
    #[error("Esta etiqueta ya ha sido agregada")]
    Duplicate,
    #[error("No puedes agregar más de {max} etiquetas")]
    LimitReached { max: usize },
    #[error("Las etiquetas no pueden tener más de {max} caracteres")]
    TooLong { max: usize },
}

impl TagError {
    pub fn title(&self) -> &'static str {
        match self {
            TagError::Empty => "Etiqueta vacía",
            TagError::Duplicate => "Etiqueta duplicada",
            TagError::LimitReached { .. } => "Límite alcanzado",
            TagError::TooLong { .. } => "Etiqueta muy larga",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<Tag>,
    max_tags: usize,
    max_len: usize,
}

impl TagList {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            tags: Vec::new(),
            max_tags: config.max_tags,
            max_len: config.max_tag_len,
        }
    }

    /// Rebuilds the list from a serialized hidden field.
    ///
    /// Malformed JSON or anything other than an array of strings yields an
    /// empty list; entries that break the list rules are skipped.
    pub fn from_hidden(raw: &str, config: &FormConfig) -> Self {
        let mut list = Self::new(config);
        if raw.trim().is_empty() {
            return list;
        }
        let entries: Vec<String> = match serde_json::from_str(raw) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(error = %err, "failed to load existing tags");
                return list;
            }
        };
        for entry in entries {
            if let Err(err) = list.add(&entry) {
                tracing::warn!(tag = %entry, reason = %err, "skipping stored tag");
            }
        }
        list
    }

    /// Normalizes and appends `raw`. Checks run in a fixed order: empty,
    /// duplicate, limit, length.
    pub fn add(&mut self, raw: &str) -> Result<Tag, TagError> {
        let normalized = Tag::normalize(raw);
        if normalized.is_empty() {
            return Err(TagError::Empty);
        }
        if self.contains(&normalized) {
            return Err(TagError::Duplicate);
        }
        if self.tags.len() >= self.max_tags {
            return Err(TagError::LimitReached { max: self.max_tags });
        }
        if char_len(&normalized) > self.max_len {
            return Err(TagError::TooLong { max: self.max_len });
        }
        let tag = Tag(normalized);
        self.tags.push(tag.clone());
        Ok(tag)
    }

    /// Removes an exact match. Returns whether anything was removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|candidate| candidate.0 == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate.0 == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.tags).unwrap_or_else(|_| "[]".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> TagList {
        TagList::new(&FormConfig::default())
    }

    #[test]
    fn add_normalizes_input() {
        let mut tags = list();
        let tag = tags.add("  Montaña ").unwrap();
        assert_eq!(tag.as_str(), "montaña");
        assert_eq!(tags.to_json(), r#"["montaña"]"#);
    }

    #[test]
    fn duplicates_are_detected_after_normalization() {
        let mut tags = list();
        tags.add("playa").unwrap();
        assert_eq!(tags.add(" PLAYA"), Err(TagError::Duplicate));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(list().add("   "), Err(TagError::Empty));
    }

    #[test]
    fn limit_is_checked_before_length() {
        let mut tags = list();
        for i in 0..10 {
            tags.add(&format!("tag{i}")).unwrap();
        }
        let err = tags.add("una etiqueta demasiado larga").unwrap_err();
        assert_eq!(err, TagError::LimitReached { max: 10 });
        assert_eq!(err.to_string(), "No puedes agregar más de 10 etiquetas");
    }

    #[test]
    fn length_counts_characters() {
        let mut tags = list();
        assert!(tags.add(&"ñ".repeat(20)).is_ok());
        assert_eq!(
            tags.add(&"a".repeat(21)),
            Err(TagError::TooLong { max: 20 })
        );
    }

    #[test]
    fn remove_requires_exact_match() {
        let mut tags = list();
        tags.add("rural").unwrap();
        assert!(!tags.remove("Rural"));
        assert!(tags.remove("rural"));
        assert!(tags.is_empty());
        assert_eq!(tags.to_json(), "[]");
    }

    #[test]
    fn hidden_field_round_trips() {
        let config = FormConfig::default();
        let mut tags = TagList::new(&config);
        tags.add("aventura").unwrap();
        tags.add("cultura").unwrap();
        let restored = TagList::from_hidden(&tags.to_json(), &config);
        assert_eq!(restored, tags);
    }

    #[test]
    fn malformed_hidden_field_yields_empty_list() {
        let config = FormConfig::default();
        assert!(TagList::from_hidden("{not json", &config).is_empty());
        assert!(TagList::from_hidden(r#"{"a": 1}"#, &config).is_empty());
        assert!(TagList::from_hidden("[1, 2]", &config).is_empty());
    }

    #[test]
    fn stored_tags_are_normalized_and_deduplicated() {
        let config = FormConfig::default();
        let tags = TagList::from_hidden(r#"["Playa", "playa", " sol "]"#, &config);
        let names: Vec<&str> = tags.iter().map(Tag::as_str).collect();
        assert_eq!(names, vec!["playa", "sol"]);
    }
}
