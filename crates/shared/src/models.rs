//! Data models shared between the catalog adapters and local state.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

/// Kind of media a favorite refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Anime,
    Manga,
}

impl MediaKind {
    /// Storage key holding the JSON-encoded id list for this kind
    pub fn storage_key(&self) -> &'static str {
        match self {
            MediaKind::Anime => "anime_favorites",
            MediaKind::Manga => "manga_favorites",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Anime => write!(f, "anime"),
            MediaKind::Manga => write!(f, "manga"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anime" => Ok(MediaKind::Anime),
            "manga" => Ok(MediaKind::Manga),
            _ => Err(anyhow::anyhow!("Invalid media kind: {}", s)),
        }
    }
}

/// Compile-time pairing of a media kind with its identifier type.
///
/// Anime are keyed by numeric MyAnimeList ids, manga by opaque MangaDex ids.
pub trait FavoriteKind {
    type Id: Serialize + DeserializeOwned + PartialEq + Clone + Debug;

    const KIND: MediaKind;
}

/// Anime favorites (numeric ids)
#[derive(Debug, Clone, Copy)]
pub struct Anime;

impl FavoriteKind for Anime {
    type Id = u32;

    const KIND: MediaKind = MediaKind::Anime;
}

/// Manga favorites (string ids)
#[derive(Debug, Clone, Copy)]
pub struct Manga;

impl FavoriteKind for Manga {
    type Id = String;

    const KIND: MediaKind = MediaKind::Manga;
}
