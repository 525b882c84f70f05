//! Adapter traits.
//!
//! Views are written against these traits so they do not care whether the
//! catalog is the live HTTP client or an in-process stand-in.

use crate::envelope::Envelope;
use crate::error::Result;
use crate::jikan::{AnimeDetail, AnimeSummary, Episode, JikanClient, Recommendation};
use crate::mangadex::{CoverQuality, MangaChapter, MangaDetail, MangaDexClient, MangaSummary};
use crate::season::Season;
use std::future::Future;

/// Anime catalog operations used by the views
pub trait AnimeSource: Send + Sync {
    fn list_top(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Envelope<Vec<AnimeSummary>>>> + Send;

    fn list_seasonal(
        &self,
        year: Option<i32>,
        season: Option<Season>,
    ) -> impl Future<Output = Result<Envelope<Vec<AnimeSummary>>>> + Send;

    fn get_by_id(&self, id: u32) -> impl Future<Output = Result<Envelope<AnimeDetail>>> + Send;

    fn get_episodes(
        &self,
        id: u32,
        page: u32,
    ) -> impl Future<Output = Result<Envelope<Vec<Episode>>>> + Send;

    fn get_recommendations(
        &self,
        id: u32,
    ) -> impl Future<Output = Result<Envelope<Vec<Recommendation>>>> + Send;
}

/// Manga catalog operations used by the views
pub trait MangaSource: Send + Sync {
    fn list_popular(
        &self,
        limit: u32,
        offset: u32,
    ) -> impl Future<Output = Result<Envelope<Vec<MangaSummary>>>> + Send;

    fn get_by_id(&self, id: &str) -> impl Future<Output = Result<Envelope<MangaDetail>>> + Send;

    fn get_chapters(
        &self,
        manga_id: &str,
        limit: u32,
        offset: u32,
    ) -> impl Future<Output = Result<Envelope<Vec<MangaChapter>>>> + Send;

    fn cover_url(&self, manga_id: &str, file_name: &str, quality: CoverQuality) -> String;
}

impl AnimeSource for JikanClient {
    fn list_top(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Envelope<Vec<AnimeSummary>>>> + Send {
        JikanClient::list_top(self, page, limit, None)
    }

    fn list_seasonal(
        &self,
        year: Option<i32>,
        season: Option<Season>,
    ) -> impl Future<Output = Result<Envelope<Vec<AnimeSummary>>>> + Send {
        JikanClient::list_seasonal(self, year, season)
    }

    fn get_by_id(&self, id: u32) -> impl Future<Output = Result<Envelope<AnimeDetail>>> + Send {
        JikanClient::get_by_id(self, id)
    }

    fn get_episodes(
        &self,
        id: u32,
        page: u32,
    ) -> impl Future<Output = Result<Envelope<Vec<Episode>>>> + Send {
        JikanClient::get_episodes(self, id, page)
    }

    fn get_recommendations(
        &self,
        id: u32,
    ) -> impl Future<Output = Result<Envelope<Vec<Recommendation>>>> + Send {
        JikanClient::get_recommendations(self, id)
    }
}

impl MangaSource for MangaDexClient {
    fn list_popular(
        &self,
        limit: u32,
        offset: u32,
    ) -> impl Future<Output = Result<Envelope<Vec<MangaSummary>>>> + Send {
        MangaDexClient::list_popular(self, limit, offset)
    }

    fn get_by_id(&self, id: &str) -> impl Future<Output = Result<Envelope<MangaDetail>>> + Send {
        MangaDexClient::get_by_id(self, id)
    }

    fn get_chapters(
        &self,
        manga_id: &str,
        limit: u32,
        offset: u32,
    ) -> impl Future<Output = Result<Envelope<Vec<MangaChapter>>>> + Send {
        MangaDexClient::get_chapters(self, manga_id, limit, offset)
    }

    fn cover_url(&self, manga_id: &str, file_name: &str, quality: CoverQuality) -> String {
        MangaDexClient::cover_url(self, manga_id, file_name, quality)
    }
}
