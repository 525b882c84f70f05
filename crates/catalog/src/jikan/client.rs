//! Jikan API client (anime catalog adapter).

use super::types::*;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::http::{HttpClient, Query, RequestDelay};
use crate::season::{Clock, Season, SystemClock};
use shared::config::JikanConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Jikan API v4 client
#[derive(Clone)]
pub struct JikanClient {
    /// HTTP client with the fixed pre-request delay
    http: HttpClient,
    /// Date source for current-season lookups
    clock: Arc<dyn Clock>,
}

impl JikanClient {
    /// Create a new Jikan client
    pub fn new(base_url: impl Into<String>, request_delay_ms: u64) -> anyhow::Result<Self> {
        let http = HttpClient::new(
            "jikan",
            base_url,
            RequestDelay::from_millis(request_delay_ms),
            None,
        )?;

        Ok(Self {
            http,
            clock: Arc::new(SystemClock),
        })
    }

    /// Create a client from configuration
    pub fn from_config(config: &JikanConfig) -> anyhow::Result<Self> {
        let http = HttpClient::new(
            "jikan",
            config.base_url.clone(),
            RequestDelay::from_millis(config.request_delay_ms),
            config.timeout_secs.map(Duration::from_secs),
        )?;

        Ok(Self {
            http,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used to resolve the current season
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Top-ranked anime, optionally narrowed by a ranking filter
    pub async fn list_top(
        &self,
        page: u32,
        limit: u32,
        filter: Option<TopFilter>,
    ) -> Result<Envelope<Vec<AnimeSummary>>> {
        let (page, limit) = (page.max(1), limit.max(1));
        info!(page = page, limit = limit, filter = ?filter, "Fetching top anime");

        let mut query: Query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(filter) = filter {
            query.push(("filter", filter.as_str().to_string()));
        }

        self.list("/top/anime", &query).await
    }

    /// Anime of a season; missing year or season default to today's
    pub async fn list_seasonal(
        &self,
        year: Option<i32>,
        season: Option<Season>,
    ) -> Result<Envelope<Vec<AnimeSummary>>> {
        let (current_year, current_season) = self.clock.current_season();
        let year = year.unwrap_or(current_year);
        let season = season.unwrap_or(current_season);

        info!(year = year, season = %season, "Fetching seasonal anime");
        self.list(&format!("/seasons/{}/{}", year, season), &Query::new())
            .await
    }

    /// Anime airing this season, as the upstream defines it
    pub async fn list_current_season(&self, page: u32) -> Result<Envelope<Vec<AnimeSummary>>> {
        info!(page = page, "Fetching current season");
        self.list("/seasons/now", &vec![("page", page.max(1).to_string())])
            .await
    }

    /// Search anime; parameters are passed through as given
    pub async fn search(&self, params: &SearchParams) -> Result<Envelope<Vec<AnimeSummary>>> {
        info!(query = ?params.q, page = ?params.page, "Searching anime");
        self.list("/anime", &params.to_query()).await
    }

    /// Full anime details by MAL ID
    pub async fn get_by_id(&self, id: u32) -> Result<Envelope<AnimeDetail>> {
        debug!(mal_id = id, "Fetching anime details");
        let response: JikanResponse<AnimeDetail> = self
            .http
            .get_json(&format!("/anime/{}", id), &Query::new())
            .await?;
        Ok(Envelope::paged(response.data, response.pagination))
    }

    /// One page of an anime's episode list
    pub async fn get_episodes(&self, id: u32, page: u32) -> Result<Envelope<Vec<Episode>>> {
        debug!(mal_id = id, page = page, "Fetching anime episodes");
        self.list(
            &format!("/anime/{}/episodes", id),
            &vec![("page", page.max(1).to_string())],
        )
        .await
    }

    /// Recommendations for an anime; each wraps the recommended entry
    pub async fn get_recommendations(&self, id: u32) -> Result<Envelope<Vec<Recommendation>>> {
        debug!(mal_id = id, "Fetching anime recommendations");
        self.list(&format!("/anime/{}/recommendations", id), &Query::new())
            .await
    }

    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<Envelope<Vec<T>>> {
        let response: JikanResponse<Vec<T>> = self.http.get_json(path, query).await?;
        debug!(path = path, items = response.data.len(), "Listing received");
        Ok(Envelope::paged(response.data, response.pagination))
    }
}
