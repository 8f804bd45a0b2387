//! Application context.
//!
//! Owns the durable storage handle and the three stores, and relays the
//! session-ended signal from the auth store to the favorites store. Stores
//! have no ambient access to each other.

use crate::models::config::Config;
use crate::services::tmdb::{CatalogApi, TmdbClient};
use crate::storage::Storage;
use crate::store::{AuthStore, FavoritesStore, MovieStore, SessionEvent};
use crate::Result;
use std::sync::Arc;

/// Context-owned state for one running instance.
pub struct App {
    pub storage: Storage,
    pub movies: MovieStore,
    pub favorites: FavoritesStore,
    pub auth: AuthStore,
}

impl App {
    /// Build the context from configuration: real TMDB client, durable
    /// storage under the configured data directory.
    pub fn new(config: &Config) -> Result<Self> {
        let client: Arc<dyn CatalogApi> = Arc::new(TmdbClient::new(config.tmdb.clone())?);
        let storage = Storage::open(&config.data_dir)?;
        Ok(Self::with_client(client, storage))
    }

    /// Build the context around an injected catalog client. Used by tests
    /// and by anything embedding the stores.
    pub fn with_client(client: Arc<dyn CatalogApi>, storage: Storage) -> Self {
        Self {
            movies: MovieStore::new(client),
            favorites: FavoritesStore::new(),
            auth: AuthStore::new(),
            storage,
        }
    }

    /// Startup sequence: restore the session if a stored token is still
    /// valid, then hydrate or drop the favorites IDs accordingly.
    pub fn initialize(&mut self) {
        match self.auth.initialize(&self.storage) {
            SessionEvent::Restored => self.favorites.initialize(&self.storage),
            SessionEvent::Ended => self.favorites.clear_all(&self.storage),
        }
    }

    /// The route-guard boolean.
    pub fn is_logged_in(&self) -> bool {
        self.auth.is_logged_in()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        self.auth.login(&self.storage, email, password).await
    }

    /// End the session and relay the cleanup signal to favorites.
    pub fn logout(&mut self) {
        match self.auth.logout(&self.storage) {
            SessionEvent::Ended => self.favorites.clear_all(&self.storage),
            SessionEvent::Restored => {}
        }
    }

    /// Refresh the session token. On failure the auth store has already
    /// ended the session, so the favorites cleanup is relayed here too.
    pub async fn refresh_session(&mut self) -> Result<bool> {
        match self.auth.refresh_token(&self.storage).await {
            Ok(refreshed) => Ok(refreshed),
            Err(err) => {
                self.favorites.clear_all(&self.storage);
                Err(err)
            }
        }
    }
}
