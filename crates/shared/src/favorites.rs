//! Favorites index.
//!
//! Two independent ordered sets of identifiers (anime and manga), each
//! persisted as a JSON array under its own storage key. A store created with
//! [`FavoritesStore::detached`] has no storage medium: reads are empty and
//! writes are no-ops.

use crate::models::{FavoriteKind, MediaKind};
use crate::storage::KeyValueStore;
use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Favorites store manager
pub struct FavoritesStore {
    backend: Option<Box<dyn KeyValueStore>>,
}

impl FavoritesStore {
    /// Create a store persisting to the given backend
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Some(Box::new(backend)),
        }
    }

    /// Create a store with no storage medium
    pub fn detached() -> Self {
        Self { backend: None }
    }

    /// Whether a storage medium is attached
    pub fn is_attached(&self) -> bool {
        self.backend.is_some()
    }

    /// List favorites of kind `K` in insertion order
    ///
    /// Absent, unreadable or unparsable storage yields an empty list.
    pub fn list<K: FavoriteKind>(&self) -> Vec<K::Id> {
        self.load::<K>().unwrap_or_else(|e| {
            warn!(key = K::KIND.storage_key(), error = %e, "Failed to read favorites, treating as empty");
            Vec::new()
        })
    }

    /// Add `id` to favorites of kind `K`; adding an existing id changes nothing
    pub fn add<K: FavoriteKind>(&self, id: K::Id) -> Result<()> {
        if self.backend.is_none() {
            return Ok(());
        }

        let mut ids = self.load::<K>()?;
        if ids.contains(&id) {
            debug!(kind = %K::KIND, id = ?id, "Already a favorite");
            return Ok(());
        }

        debug!(kind = %K::KIND, id = ?id, "Adding favorite");
        ids.push(id);
        self.write::<K>(&ids)
    }

    /// Remove `id` from favorites of kind `K`; removing an absent id changes nothing
    pub fn remove<K: FavoriteKind>(&self, id: &K::Id) -> Result<()> {
        if self.backend.is_none() {
            return Ok(());
        }

        let mut ids = self.load::<K>()?;
        let before = ids.len();
        ids.retain(|existing| existing != id);

        if ids.len() == before {
            debug!(kind = %K::KIND, id = ?id, "Not a favorite, nothing to remove");
            return Ok(());
        }

        debug!(kind = %K::KIND, id = ?id, "Removing favorite");
        self.write::<K>(&ids)
    }

    /// Whether `id` is a favorite of kind `K`
    pub fn contains<K: FavoriteKind>(&self, id: &K::Id) -> bool {
        self.list::<K>().contains(id)
    }

    /// Add `id` if absent, remove it if present; returns the new membership
    pub fn toggle<K: FavoriteKind>(&self, id: K::Id) -> Result<bool> {
        if self.load::<K>()?.contains(&id) {
            self.remove::<K>(&id)?;
            Ok(false)
        } else {
            self.add::<K>(id)?;
            Ok(self.is_attached())
        }
    }

    /// Number of stored favorites per kind
    pub fn count(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::Anime => self.list::<crate::models::Anime>().len(),
            MediaKind::Manga => self.list::<crate::models::Manga>().len(),
        }
    }

    /// Stored ids of kind `K`; backend failures are returned, corrupt data reads as empty
    fn load<K: FavoriteKind>(&self) -> Result<Vec<K::Id>> {
        let Some(backend) = &self.backend else {
            return Ok(Vec::new());
        };

        let key = K::KIND.storage_key();
        let Some(raw) = backend
            .get(key)
            .with_context(|| format!("Failed to read {} favorites", K::KIND))?
        else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<K::Id>>(&raw) {
            Ok(ids) => Ok(dedup_in_order(ids)),
            Err(e) => {
                warn!(key = key, error = %e, "Stored favorites are corrupt, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn write<K: FavoriteKind>(&self, ids: &[K::Id]) -> Result<()> {
        let Some(backend) = &self.backend else {
            return Ok(());
        };

        let key = K::KIND.storage_key();
        let encoded = serde_json::to_string(ids).context("Failed to encode favorites")?;
        backend
            .set(key, &encoded)
            .with_context(|| format!("Failed to persist {} favorites", K::KIND))
    }
}

fn dedup_in_order<T: PartialEq>(ids: Vec<T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
