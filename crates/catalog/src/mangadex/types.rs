//! MangaDex API response types.

use super::cover::{cover_url, CoverQuality};
use super::localized::{LocalizedText, NO_DESCRIPTION, UNKNOWN_TITLE};
use crate::envelope::OffsetPagination;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

/// Raw `{ result, response, data, limit, offset, total }` wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct MangaDexResponse<T> {
    pub result: String,
    #[serde(default)]
    pub response: Option<String>,
    pub data: T,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub total: Option<u32>,
}

impl<T> MangaDexResponse<T> {
    /// Offset window, when the response is a collection
    pub fn window(&self) -> Option<OffsetPagination> {
        Some(OffsetPagination {
            limit: self.limit?,
            offset: self.offset.unwrap_or(0),
            total: self.total.unwrap_or(0),
        })
    }
}

/// Manga as returned by list, search and lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangaSummary {
    pub id: String,
    pub attributes: MangaAttributes,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Lookup by id returns the same shape as listings
pub type MangaDetail = MangaSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaAttributes {
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub alt_titles: Vec<LocalizedText>,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub status: MangaStatus,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub content_rating: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub last_chapter: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Publication status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MangaStatus {
    Ongoing,
    Completed,
    Hiatus,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Genre/theme tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub attributes: TagAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAttributes {
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub group: Option<String>,
}

impl Tag {
    pub fn name(&self) -> &str {
        self.attributes.name.resolve_or(UNKNOWN_TITLE)
    }
}

/// Entity related to a manga, decoded by its `type` tag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Relationship {
    CoverArt {
        id: String,
        file_name: Option<String>,
    },
    Author {
        id: String,
        name: Option<String>,
    },
    Artist {
        id: String,
        name: Option<String>,
    },
    Other {
        id: String,
        kind: String,
    },
}

#[derive(Deserialize)]
struct RawRelationship {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attributes: Option<RawRelationshipAttributes>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRelationshipAttributes {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    file_name: Option<String>,
}

impl From<RawRelationship> for Relationship {
    fn from(raw: RawRelationship) -> Self {
        let RawRelationship { id, kind, attributes } = raw;
        let (name, file_name) = attributes
            .map(|a| (a.name, a.file_name))
            .unwrap_or_default();

        match kind.as_str() {
            "cover_art" => Relationship::CoverArt { id, file_name },
            "author" => Relationship::Author { id, name },
            "artist" => Relationship::Artist { id, name },
            _ => Relationship::Other { id, kind },
        }
    }
}

impl<'de> Deserialize<'de> for Relationship {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawRelationship::deserialize(deserializer).map(Relationship::from)
    }
}

impl MangaSummary {
    /// English, Japanese, then first available title
    pub fn display_title(&self) -> &str {
        self.attributes.title.resolve_or(UNKNOWN_TITLE)
    }

    pub fn display_description(&self) -> &str {
        self.attributes.description.resolve_or(NO_DESCRIPTION)
    }

    /// Cover file name from the expanded `cover_art` relationship
    pub fn cover_file(&self) -> Option<&str> {
        self.relationships.iter().find_map(|rel| match rel {
            Relationship::CoverArt {
                file_name: Some(file),
                ..
            } => Some(file.as_str()),
            _ => None,
        })
    }

    /// Cover image URL, if the cover relationship was expanded
    pub fn cover_url(&self, uploads_base: &str, quality: CoverQuality) -> Option<String> {
        self.cover_file()
            .map(|file| cover_url(uploads_base, &self.id, file, quality))
    }

    pub fn authors(&self) -> Vec<&str> {
        self.relationships
            .iter()
            .filter_map(|rel| match rel {
                Relationship::Author { name: Some(name), .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn artists(&self) -> Vec<&str> {
        self.relationships
            .iter()
            .filter_map(|rel| match rel {
                Relationship::Artist { name: Some(name), .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tag_names(&self) -> Vec<&str> {
        self.attributes.tags.iter().map(Tag::name).collect()
    }
}

/// Chapter from a manga feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangaChapter {
    pub id: String,
    pub attributes: ChapterAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterAttributes {
    #[serde(default)]
    pub volume: Option<String>,
    /// Absent for oneshots
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub translated_language: String,
    #[serde(default)]
    pub publish_at: Option<String>,
    #[serde(default)]
    pub pages: u32,
}

impl MangaChapter {
    /// Numeric chapter number ("10.5" parses); None for oneshots and
    /// non-finite text such as "NaN" or "inf"
    pub fn chapter_number(&self) -> Option<f64> {
        self.attributes
            .chapter
            .as_deref()
            .and_then(|c| c.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
    }

    pub fn is_oneshot(&self) -> bool {
        self.attributes
            .chapter
            .as_deref()
            .map_or(true, |c| c.trim().is_empty())
    }

    /// Chapter label for display
    pub fn display_number(&self) -> String {
        match self.attributes.chapter.as_deref().map(str::trim) {
            Some(chapter) if !chapter.is_empty() => format!("Chapter {}", chapter),
            _ => "Oneshot".to_string(),
        }
    }
}

/// Order chapters by numeric chapter number, never lexically
///
/// Chapters without a parsable number keep their relative order and go last.
pub fn sort_chapters_numerically(chapters: &mut [MangaChapter]) {
    chapters.sort_by(|a, b| match (a.chapter_number(), b.chapter_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
