//! MangaDex API adapter (manga catalog).
//!
//! Listings use offset-cursor pagination. Manga carry language-keyed text
//! and a typed relationship list (cover art, authors, artists).

pub mod client;
pub mod cover;
pub mod localized;
pub mod types;

pub use client::MangaDexClient;
pub use cover::{cover_url, CoverQuality};
pub use localized::LocalizedText;
pub use types::*;
