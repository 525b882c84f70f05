//! Shared library for the animanga catalog.
//!
//! This crate provides the local-state side of the project:
//! - Configuration management
//! - Logging infrastructure
//! - Data directory layout
//! - SQLite-backed key-value storage
//! - The favorites index

pub mod config;
pub mod db;
pub mod favorites;
pub mod logging;
pub mod models;
pub mod paths;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use favorites::FavoritesStore;
pub use logging::LogConfig;
pub use models::{FavoriteKind, MediaKind};
pub use paths::DataPaths;
pub use storage::{KeyValueStore, MemoryStore};

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
