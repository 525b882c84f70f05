//! Language-keyed text maps.
//!
//! MangaDex has no canonical title: titles, descriptions and tag names are
//! maps from language code to text. Entries are kept in document order so
//! that "first available" is stable for a given payload.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Fallback when a manga has no usable title
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Fallback when a manga has no usable description
pub const NO_DESCRIPTION: &str = "No description available.";

/// Language code to text, in upstream order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText {
    entries: Vec<(String, String)>,
}

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the text for `lang`
    pub fn insert(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        let lang = lang.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(l, _)| *l == lang) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((lang, text)),
        }
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == lang)
            .map(|(_, text)| text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }

    /// English, then Japanese, then the first non-empty entry
    pub fn resolve(&self) -> Option<&str> {
        self.non_empty("en")
            .or_else(|| self.non_empty("ja"))
            .or_else(|| {
                self.entries
                    .iter()
                    .map(|(_, text)| text.as_str())
                    .find(|text| !text.is_empty())
            })
    }

    /// [`resolve`](Self::resolve) with a literal fallback
    pub fn resolve_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.resolve().unwrap_or(fallback)
    }

    fn non_empty(&self, lang: &str) -> Option<&str> {
        self.get(lang).filter(|text| !text.is_empty())
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut text = LocalizedText::new();
        for (lang, value) in iter {
            text.insert(lang, value);
        }
        text
    }
}

impl Serialize for LocalizedText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (lang, text) in &self.entries {
            map.serialize_entry(lang, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LocalizedTextVisitor;

        impl<'de> Visitor<'de> for LocalizedTextVisitor {
            type Value = LocalizedText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language codes to text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut text = LocalizedText::new();
                while let Some((lang, value)) = access.next_entry::<String, Option<String>>()? {
                    if let Some(value) = value {
                        text.insert(lang, value);
                    }
                }
                Ok(text)
            }

            // MangaDex sends `[]` instead of `{}` for empty maps
            fn visit_seq<A: serde::de::SeqAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<Self::Value, A::Error> {
                while access.next_element::<serde::de::IgnoredAny>()?.is_some() {}
                Ok(LocalizedText::new())
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(LocalizedText::new())
            }
        }

        deserializer.deserialize_any(LocalizedTextVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(pairs: &[(&str, &str)]) -> LocalizedText {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_resolution_order() {
        assert_eq!(text(&[("ja", "B"), ("en", "A")]).resolve_or(UNKNOWN_TITLE), "A");
        assert_eq!(text(&[("ja", "B")]).resolve_or(UNKNOWN_TITLE), "B");
        assert_eq!(text(&[("fr", "C")]).resolve_or(UNKNOWN_TITLE), "C");
        assert_eq!(text(&[]).resolve_or(UNKNOWN_TITLE), "Unknown");
    }

    #[test]
    fn test_first_entry_follows_document_order() {
        let parsed: LocalizedText =
            serde_json::from_str(r#"{"ko": "K", "fr": "F", "de": "D"}"#).unwrap();
        assert_eq!(parsed.resolve(), Some("K"));

        // Same map, same answer
        let again: LocalizedText =
            serde_json::from_str(r#"{"ko": "K", "fr": "F", "de": "D"}"#).unwrap();
        assert_eq!(again.resolve(), parsed.resolve());
    }

    #[test]
    fn test_empty_values_are_skipped() {
        assert_eq!(text(&[("en", ""), ("ja", "B")]).resolve(), Some("B"));
        assert_eq!(text(&[("en", ""), ("ja", "")]).resolve(), None);
    }

    #[test]
    fn test_tolerates_array_and_null_payloads() {
        let empty: LocalizedText = serde_json::from_str("[]").unwrap();
        assert!(empty.is_empty());

        let null_value: LocalizedText = serde_json::from_str(r#"{"en": null, "ja": "B"}"#).unwrap();
        assert_eq!(null_value.resolve(), Some("B"));
    }

    #[test]
    fn test_serializes_as_map_in_order() {
        let value = text(&[("ja", "B"), ("en", "A")]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"ja":"B","en":"A"}"#);
    }
}
