//! Favorites store.
//!
//! Holds the user's bookmarked movie IDs plus denormalized movie snapshots.
//! Invariant: the ID sequence and the snapshot sequence have the same length
//! and the same ID set, and an ID appears at most once. Only the ID list is
//! durable; snapshots rehydrate through the movie cache store.

use crate::models::movie::Movie;
use crate::storage::{Storage, KEY_FAVORITES};
use crate::store::movies::MovieStore;
use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Backup document produced by export and consumed by import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesBackup {
    pub version: String,
    pub ids: Vec<u64>,
    pub movies: Vec<Movie>,
    pub exported_at: String,
}

/// Store for the favorites shelf.
#[derive(Default)]
pub struct FavoritesStore {
    ids: Vec<u64>,
    movies: Vec<Movie>,
    loading: bool,
    error: Option<String>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the bookmarked IDs from durable storage. Snapshots are not
    /// restored here; call [`Self::load_movie_details`] to rehydrate them.
    pub fn initialize(&mut self, storage: &Storage) {
        match storage.get(KEY_FAVORITES) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(ids) => self.ids = ids,
                Err(err) => {
                    tracing::warn!("Discarding unreadable favorites list: {err}");
                    self.ids = Vec::new();
                }
            },
            None => self.ids = Vec::new(),
        }
        self.movies.clear();
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn has_favorites(&self) -> bool {
        !self.ids.is_empty()
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Bookmarked IDs in insertion order.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Movie snapshots in insertion order.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Snapshots with the most recently added first.
    pub fn recent_first(&self) -> Vec<Movie> {
        self.movies.iter().rev().cloned().collect()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn persist(&self, storage: &Storage) -> Result<()> {
        let raw = serde_json::to_string(&self.ids)?;
        storage.set(KEY_FAVORITES, &raw)
    }

    /// Add a movie to the shelf. Already-present movies are a no-op.
    ///
    /// The ID and the snapshot are appended together; if persisting fails,
    /// both appends are rolled back so the two sequences never diverge.
    /// Returns whether the movie is on the shelf afterwards.
    pub fn add_to_favorites(&mut self, storage: &Storage, movie: Movie) -> bool {
        if self.is_favorite(movie.id) {
            return true;
        }

        let id = movie.id;
        self.ids.push(id);
        self.movies.push(movie);

        if let Err(err) = self.persist(storage) {
            self.ids.pop();
            self.movies.pop();
            self.error = Some(format!("Failed to save favorite: {err}"));
            tracing::error!("Error adding movie {id} to favorites: {err}");
            return false;
        }

        self.error = None;
        true
    }

    /// Remove a movie from the shelf. Absent movies are a no-op.
    pub fn remove_from_favorites(&mut self, storage: &Storage, id: u64) {
        if !self.is_favorite(id) {
            return;
        }

        self.ids.retain(|&existing| existing != id);
        self.movies.retain(|movie| movie.id != id);

        if let Err(err) = self.persist(storage) {
            self.error = Some(format!("Failed to remove favorite: {err}"));
            tracing::error!("Error removing movie {id} from favorites: {err}");
            return;
        }

        self.error = None;
    }

    /// Add or remove based on current membership.
    pub fn toggle_favorite(&mut self, storage: &Storage, movie: Movie) {
        if self.is_favorite(movie.id) {
            self.remove_from_favorites(storage, movie.id);
        } else {
            self.add_to_favorites(storage, movie);
        }
    }

    /// Resolve a snapshot for every bookmarked ID, in bookmark order.
    ///
    /// Tries the movie cache first and falls back to a fresh detail fetch.
    /// A failure on one ID is logged and that ID skipped; the snapshot list
    /// is replaced wholesale with whatever resolved.
    pub async fn load_movie_details(&mut self, movies: &mut MovieStore) {
        if self.ids.is_empty() {
            self.movies.clear();
            return;
        }

        self.loading = true;
        self.error = None;

        let mut resolved = Vec::with_capacity(self.ids.len());
        for &id in &self.ids {
            if let Some(details) = movies.movie_by_id(id) {
                resolved.push(details.summary());
                continue;
            }
            match movies.fetch_movie_details(id, false).await {
                Ok(details) => resolved.push(details.summary()),
                Err(err) => {
                    tracing::warn!("Could not load details for movie {id}: {err}");
                }
            }
        }

        self.movies = resolved;
        self.loading = false;
    }

    /// Empty the shelf and drop the durable key.
    ///
    /// In-memory state is cleared before the key is removed, so a reload can
    /// never race into stale data. Also invoked when a session ends.
    pub fn clear_all(&mut self, storage: &Storage) {
        self.ids.clear();
        self.movies.clear();

        if let Err(err) = storage.remove(KEY_FAVORITES) {
            self.error = Some(format!("Failed to clear favorites: {err}"));
            tracing::error!("Error clearing favorites: {err}");
        }
    }

    /// Produce a backup snapshot without mutating state.
    pub fn export_favorites(&self) -> FavoritesBackup {
        FavoritesBackup {
            version: "1.0".to_string(),
            ids: self.ids.clone(),
            movies: self.movies.clone(),
            exported_at: Utc::now().to_rfc3339(),
        }
    }

    /// Replace the shelf wholesale from a backup.
    ///
    /// A persistence failure is propagated: wholesale replacement without
    /// confirmed durability is unsafe state.
    pub fn import_favorites(&mut self, storage: &Storage, backup: FavoritesBackup) -> Result<()> {
        self.ids = backup.ids;
        self.movies = backup.movies;

        match self.persist(storage) {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some(format!("Failed to import favorites: {err}"));
                Err(err)
            }
        }
    }
}
