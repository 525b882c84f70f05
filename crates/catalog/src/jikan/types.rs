//! Jikan API v4 response types.
//!
//! These types represent the JSON responses from the Jikan API. Listings
//! and nested entries omit many fields, so almost everything is optional.

use crate::envelope::PagePagination;
use serde::{Deserialize, Serialize};

/// Raw `{ data, pagination? }` wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct JikanResponse<T> {
    pub data: T,
    #[serde(default)]
    pub pagination: Option<PagePagination>,
}

/// Anime as it appears in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeSummary {
    pub mal_id: u32,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub images: AnimeImages,

    // Titles
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub title_japanese: Option<String>,

    // Type and status
    #[serde(rename = "type", default)]
    pub anime_type: Option<String>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub airing: Option<bool>,

    // Scores and rankings
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub scored_by: Option<u32>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub members: Option<u32>,
    #[serde(default)]
    pub favorites: Option<u32>,

    // Season and broadcast
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub broadcast: Option<Broadcast>,

    #[serde(default)]
    pub studios: Vec<MalEntity>,
    #[serde(default)]
    pub genres: Vec<MalEntity>,
    #[serde(default)]
    pub trailer: Option<Trailer>,
}

/// Full anime details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetail {
    #[serde(flatten)]
    pub summary: AnimeSummary,

    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub aired: Option<Aired>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub title_synonyms: Vec<String>,

    #[serde(default)]
    pub explicit_genres: Vec<MalEntity>,
    #[serde(default)]
    pub themes: Vec<MalEntity>,
    #[serde(default)]
    pub demographics: Vec<MalEntity>,
}

impl AnimeSummary {
    /// English title when known, otherwise the default title
    pub fn display_title(&self) -> &str {
        self.title_english
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.title)
    }

    /// Largest available poster, preferring JPEG
    pub fn poster_url(&self) -> Option<&str> {
        self.images
            .jpg
            .best()
            .or_else(|| self.images.webp.as_ref().and_then(ImageSet::best))
    }

    pub fn studio_names(&self) -> Vec<&str> {
        self.studios.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

impl AnimeDetail {
    pub fn id(&self) -> u32 {
        self.summary.mal_id
    }
}

/// Anime images
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeImages {
    #[serde(default)]
    pub jpg: ImageSet,
    #[serde(default)]
    pub webp: Option<ImageSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub small_image_url: Option<String>,
    #[serde(default)]
    pub large_image_url: Option<String>,
}

impl ImageSet {
    fn best(&self) -> Option<&str> {
        self.large_image_url
            .as_deref()
            .or(self.image_url.as_deref())
            .or(self.small_image_url.as_deref())
    }
}

/// Aired dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aired {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub string: Option<String>,
}

/// Broadcast information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broadcast {
    pub day: Option<String>,
    pub time: Option<String>,
    pub timezone: Option<String>,
    pub string: Option<String>,
}

/// Trailer reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trailer {
    #[serde(default)]
    pub youtube_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub embed_url: Option<String>,
}

/// MAL entity (genre, studio, theme, etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MalEntity {
    pub mal_id: u32,
    #[serde(rename = "type", default)]
    pub entity_type: Option<String>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Episode listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub mal_id: u32,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_japanese: Option<String>,
    #[serde(default)]
    pub aired: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub filler: bool,
    #[serde(default)]
    pub recap: bool,
}

/// Recommendation wrapping the recommended anime in `entry`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub entry: AnimeSummary,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub votes: u32,
}

impl Recommendation {
    /// Unwrap the recommended anime out of a recommendation list
    pub fn into_entries(recommendations: Vec<Recommendation>) -> Vec<AnimeSummary> {
        recommendations.into_iter().map(|r| r.entry).collect()
    }
}

/// Ranking filter for the top-anime listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopFilter {
    Airing,
    Upcoming,
    ByPopularity,
    Favorite,
}

impl TopFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopFilter::Airing => "airing",
            TopFilter::Upcoming => "upcoming",
            TopFilter::ByPopularity => "bypopularity",
            TopFilter::Favorite => "favorite",
        }
    }
}

impl std::str::FromStr for TopFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "airing" => Ok(TopFilter::Airing),
            "upcoming" => Ok(TopFilter::Upcoming),
            "bypopularity" | "popularity" => Ok(TopFilter::ByPopularity),
            "favorite" => Ok(TopFilter::Favorite),
            _ => Err(anyhow::anyhow!("Invalid top filter: {}", s)),
        }
    }
}

/// Anime search parameters; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub anime_type: Option<String>,
    pub status: Option<String>,
    pub rating: Option<String>,
    pub genre: Option<String>,
    pub order_by: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl SearchParams {
    /// Free-text search on the first page
    pub fn query(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Query string pairs, passed through verbatim
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("q", &self.q),
            ("type", &self.anime_type),
            ("status", &self.status),
            ("rating", &self.rating),
            ("genre", &self.genre),
            ("order_by", &self.order_by),
            ("sort", &self.sort),
        ];
        let numbers = [("page", self.page), ("limit", self.limit)];

        text.into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.clone())))
            .chain(
                numbers
                    .into_iter()
                    .filter_map(|(key, value)| value.map(|v| (key, v.to_string()))),
            )
            .collect()
    }
}
