//! View aggregation.
//!
//! Each view fans out its independent fetches concurrently and joins them.
//! The landing and detail views are all-or-nothing: one failed fetch fails
//! the view and the other results are dropped. The favorites view tolerates
//! per-item failures and simply omits those items.
//!
//! Every view runs under a [`CancellationToken`] owned by whoever displays
//! it. Once the token fires the view resolves with [`ApiError::Cancelled`]
//! and nothing it fetched is used.

use crate::envelope::Envelope;
use crate::error::{ApiError, Result};
use crate::http::cancellable;
use crate::jikan::{AnimeDetail, AnimeSummary, Episode, Recommendation};
use crate::mangadex::{CoverQuality, MangaChapter, MangaDetail, MangaSummary};
use crate::source::{AnimeSource, MangaSource};
use futures::future::join_all;
use serde::Serialize;
use shared::models::{Anime, FavoriteKind, Manga};
use shared::FavoritesStore;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Items per landing-page row
pub const LANDING_ROW_SIZE: u32 = 12;

/// Chapters shown on a manga detail page
pub const DETAIL_CHAPTER_LIMIT: u32 = 50;

#[derive(Debug, Clone, Serialize)]
pub struct LandingPage {
    pub top_anime: Envelope<Vec<AnimeSummary>>,
    pub seasonal_anime: Envelope<Vec<AnimeSummary>>,
    pub popular_manga: Envelope<Vec<MangaSummary>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnimeDetailPage {
    pub anime: AnimeDetail,
    pub recommendations: Vec<AnimeSummary>,
    pub episodes: Envelope<Vec<Episode>>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MangaDetailPage {
    pub manga: MangaDetail,
    pub cover_url: Option<String>,
    pub chapters: Envelope<Vec<MangaChapter>>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FavoritesPage {
    pub anime: Vec<AnimeDetail>,
    pub manga: Vec<MangaDetail>,
}

/// The adapters plus local favorites, as seen by the views
pub struct Catalog<A, M> {
    anime: A,
    manga: M,
    favorites: FavoritesStore,
}

impl<A: AnimeSource, M: MangaSource> Catalog<A, M> {
    pub fn new(anime: A, manga: M, favorites: FavoritesStore) -> Self {
        Self {
            anime,
            manga,
            favorites,
        }
    }

    pub fn anime(&self) -> &A {
        &self.anime
    }

    pub fn manga(&self) -> &M {
        &self.manga
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Top anime, this season's anime and popular manga
    pub async fn load_landing(&self, token: &CancellationToken) -> Result<LandingPage> {
        info!("Loading landing view");

        let (top_anime, seasonal_anime, popular_manga) = cancellable(token, async {
            futures::try_join!(
                self.anime.list_top(1, LANDING_ROW_SIZE),
                self.anime.list_seasonal(None, None),
                self.manga.list_popular(LANDING_ROW_SIZE, 0),
            )
        })
        .await?;

        Ok(LandingPage {
            top_anime,
            seasonal_anime,
            popular_manga,
        })
    }

    /// Anime details with recommendations and the first episode page
    pub async fn load_anime_detail(&self, id: u32, token: &CancellationToken) -> Result<AnimeDetailPage> {
        info!(mal_id = id, "Loading anime detail view");

        let (anime, recommendations, episodes) = cancellable(token, async {
            futures::try_join!(
                self.anime.get_by_id(id),
                self.anime.get_recommendations(id),
                self.anime.get_episodes(id, 1),
            )
        })
        .await?;

        Ok(AnimeDetailPage {
            anime: anime.data,
            recommendations: Recommendation::into_entries(recommendations.data),
            episodes,
            is_favorite: self.favorites.contains::<Anime>(&id),
        })
    }

    /// Manga details with the first window of chapters
    pub async fn load_manga_detail(&self, id: &str, token: &CancellationToken) -> Result<MangaDetailPage> {
        info!(manga_id = id, "Loading manga detail view");

        let (manga, chapters) = cancellable(token, async {
            futures::try_join!(
                self.manga.get_by_id(id),
                self.manga.get_chapters(id, DETAIL_CHAPTER_LIMIT, 0),
            )
        })
        .await?;

        let manga = manga.data;
        let cover_url = manga
            .cover_file()
            .map(|file| self.manga.cover_url(&manga.id, file, CoverQuality::Original));

        Ok(MangaDetailPage {
            is_favorite: self.favorites.contains::<Manga>(&id.to_string()),
            manga,
            cover_url,
            chapters,
        })
    }

    /// Details for every stored favorite; items that fail to load are left out
    pub async fn load_favorites(&self, token: &CancellationToken) -> Result<FavoritesPage> {
        let anime_ids = self.favorites.list::<Anime>();
        let manga_ids = self.favorites.list::<Manga>();

        info!(
            anime = anime_ids.len(),
            manga = manga_ids.len(),
            "Loading favorites view"
        );

        let anime_fetches = join_all(anime_ids.iter().map(|&id| async move {
            self.anime
                .get_by_id(id)
                .await
                .map_err(|e| warn!(mal_id = id, error = %e, "Dropping favorite that failed to load"))
                .ok()
        }));
        let manga_fetches = join_all(manga_ids.iter().map(|id| async move {
            self.manga
                .get_by_id(id)
                .await
                .map_err(|e| warn!(manga_id = %id, error = %e, "Dropping favorite that failed to load"))
                .ok()
        }));

        let (anime, manga) = cancellable(token, async {
            Ok::<_, ApiError>(futures::join!(anime_fetches, manga_fetches))
        })
        .await?;

        Ok(FavoritesPage {
            anime: anime.into_iter().flatten().map(|e| e.data).collect(),
            manga: manga.into_iter().flatten().map(|e| e.data).collect(),
        })
    }

    /// Flip an item's favorite state; returns the new state
    pub fn toggle_favorite<K: FavoriteKind>(&self, id: K::Id) -> anyhow::Result<bool> {
        self.favorites.toggle::<K>(id)
    }
}
