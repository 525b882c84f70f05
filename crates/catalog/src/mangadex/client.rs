//! MangaDex API client (manga catalog adapter).

use super::cover::{cover_url, CoverQuality};
use super::types::*;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::http::{HttpClient, Query, RequestDelay};
use shared::config::MangaDexConfig;
use std::time::Duration;
use tracing::{debug, info};

/// Relationships expanded inline on every manga request
const INCLUDES: [&str; 3] = ["cover_art", "author", "artist"];

/// MangaDex API client
#[derive(Debug, Clone)]
pub struct MangaDexClient {
    /// HTTP client
    http: HttpClient,
    /// Host serving cover images
    uploads_url: String,
    /// Translated language requested for chapter feeds
    chapter_language: String,
    /// Content ratings requested for listings
    content_ratings: Vec<String>,
}

impl MangaDexClient {
    /// Create a client with default uploads host, language and ratings
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let defaults = MangaDexConfig::default();
        Self::from_config(&MangaDexConfig {
            base_url: base_url.into(),
            ..defaults
        })
    }

    /// Create a client from configuration
    pub fn from_config(config: &MangaDexConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(
            "mangadex",
            config.base_url.clone(),
            RequestDelay::none(),
            config.timeout_secs.map(Duration::from_secs),
        )?;

        Ok(Self {
            http,
            uploads_url: config.uploads_url.clone(),
            chapter_language: config.chapter_language.clone(),
            content_ratings: config.content_ratings.clone(),
        })
    }

    /// Most-followed manga first
    pub async fn list_popular(&self, limit: u32, offset: u32) -> Result<Envelope<Vec<MangaSummary>>> {
        info!(limit = limit, offset = offset, "Fetching popular manga");
        self.list("/manga", &self.popular_query(limit, offset)).await
    }

    /// Title search
    pub async fn search(
        &self,
        title: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Envelope<Vec<MangaSummary>>> {
        info!(title = title, limit = limit, offset = offset, "Searching manga");
        self.list("/manga", &self.search_query(title, limit, offset))
            .await
    }

    /// Manga by its opaque id
    pub async fn get_by_id(&self, id: &str) -> Result<Envelope<MangaDetail>> {
        debug!(manga_id = id, "Fetching manga details");
        let response: MangaDexResponse<MangaDetail> = self
            .http
            .get_json(&format!("/manga/{}", id), &includes_query())
            .await?;
        Ok(Envelope::single(response.data))
    }

    /// One window of a manga's chapter feed in the configured language
    pub async fn get_chapters(
        &self,
        manga_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Envelope<Vec<MangaChapter>>> {
        debug!(manga_id = manga_id, limit = limit, offset = offset, "Fetching manga chapters");
        let mut envelope = self
            .list(
                &format!("/manga/{}/feed", manga_id),
                &self.chapters_query(limit, offset),
            )
            .await?;

        sort_chapters_numerically(&mut envelope.data);
        Ok(envelope)
    }

    /// Cover URL for a manga; pure, usable before any request completes
    pub fn cover_url(&self, manga_id: &str, file_name: &str, quality: CoverQuality) -> String {
        cover_url(&self.uploads_url, manga_id, file_name, quality)
    }

    pub fn uploads_url(&self) -> &str {
        &self.uploads_url
    }

    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<Envelope<Vec<T>>> {
        let response: MangaDexResponse<Vec<T>> = self.http.get_json(path, query).await?;
        let window = response.window().unwrap_or_default();
        debug!(path = path, items = response.data.len(), total = window.total, "Listing received");
        Ok(Envelope::offset(response.data, window))
    }

    fn popular_query(&self, limit: u32, offset: u32) -> Query {
        let mut query = window_query(limit, offset);
        query.push(("order[followedCount]", "desc".to_string()));
        self.push_ratings(&mut query);
        query.extend(includes_query());
        query
    }

    fn search_query(&self, title: &str, limit: u32, offset: u32) -> Query {
        let mut query = vec![("title", title.to_string())];
        query.extend(window_query(limit, offset));
        self.push_ratings(&mut query);
        query.extend(includes_query());
        query
    }

    fn chapters_query(&self, limit: u32, offset: u32) -> Query {
        let mut query = window_query(limit, offset);
        query.push(("translatedLanguage[]", self.chapter_language.clone()));
        query.push(("order[chapter]", "asc".to_string()));
        query
    }

    fn push_ratings(&self, query: &mut Query) {
        query.extend(
            self.content_ratings
                .iter()
                .map(|rating| ("contentRating[]", rating.clone())),
        );
    }
}

fn window_query(limit: u32, offset: u32) -> Query {
    vec![
        ("limit", limit.max(1).to_string()),
        ("offset", offset.to_string()),
    ]
}

fn includes_query() -> Query {
    INCLUDES
        .iter()
        .map(|include| ("includes[]", include.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MangaDexClient {
        MangaDexClient::new("https://api.mangadex.org").unwrap()
    }

    fn values<'a>(query: &'a Query, key: &str) -> Vec<&'a str> {
        query
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn test_popular_query() {
        let query = client().popular_query(24, 48);

        assert_eq!(values(&query, "limit"), vec!["24"]);
        assert_eq!(values(&query, "offset"), vec!["48"]);
        assert_eq!(values(&query, "order[followedCount]"), vec!["desc"]);
        assert_eq!(values(&query, "contentRating[]"), vec!["safe", "suggestive"]);
        assert_eq!(
            values(&query, "includes[]"),
            vec!["cover_art", "author", "artist"]
        );
    }

    #[test]
    fn test_search_query_never_requests_mature_content() {
        let query = client().search_query("berserk", 10, 0);

        assert_eq!(values(&query, "title"), vec!["berserk"]);
        let ratings = values(&query, "contentRating[]");
        assert!(!ratings.contains(&"erotica"));
        assert!(!ratings.contains(&"pornographic"));
        assert!(values(&query, "order[followedCount]").is_empty());
    }

    #[test]
    fn test_chapters_query() {
        let query = client().chapters_query(100, 0);

        assert_eq!(values(&query, "translatedLanguage[]"), vec!["en"]);
        assert_eq!(values(&query, "order[chapter]"), vec!["asc"]);
        assert!(values(&query, "includes[]").is_empty());
    }

    #[test]
    fn test_cover_url_uses_configured_host() {
        let client = MangaDexClient::from_config(&MangaDexConfig {
            uploads_url: "https://covers.example".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.cover_url("m1", "f.png", CoverQuality::Original),
            "https://covers.example/covers/m1/f.png"
        );
    }
}
