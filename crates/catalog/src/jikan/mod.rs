//! Jikan API v4 adapter (anime catalog).
//!
//! Jikan mirrors MyAnimeList. Listings use page-cursor pagination and every
//! call waits a fixed delay first to stay under the published rate limits.

pub mod client;
pub mod types;

pub use client::JikanClient;
pub use types::*;
