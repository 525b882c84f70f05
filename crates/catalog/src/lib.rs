//! Anime and manga catalog library.
//!
//! This library provides adapters over two public catalogs (Jikan for anime,
//! MangaDex for manga), a common envelope for their responses, the
//! aggregated views that combine them with local favorites, and browse
//! sessions for paging through listings.

pub mod envelope;
pub mod error;
pub mod http;
pub mod jikan;
pub mod mangadex;
pub mod season;
pub mod session;
pub mod source;
pub mod views;

pub use envelope::{Envelope, OffsetPagination, PagePagination, Pagination};
pub use error::{ApiError, ErrorKind};
pub use jikan::JikanClient;
pub use mangadex::{CoverQuality, MangaDexClient};
pub use season::{Clock, FixedClock, Season, SystemClock};
pub use session::{AnimeBrowser, BrowseMode, MangaBrowser, SearchDebouncer};
pub use source::{AnimeSource, MangaSource};
pub use views::Catalog;
