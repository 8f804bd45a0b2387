//! Movie cache store.
//!
//! Caches fetched movie lists and per-ID detail records. Each cache slot
//! (popular, now playing, details, search) loads independently. List pages
//! merge by ID; already-seen movies are never duplicated. Failed fetches
//! leave cached data untouched.

use crate::models::movie::{Credits, Genre, Movie, MovieDetails, PagedResponse};
use crate::services::tmdb::CatalogApi;
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed server page size for all list endpoints.
pub const PAGE_SIZE: usize = 20;

/// Cache store for catalog data.
pub struct MovieStore {
    client: Arc<dyn CatalogApi>,

    // Cache slots
    popular: Vec<Movie>,
    now_playing: Vec<Movie>,
    details: HashMap<u64, MovieDetails>,
    search_results: Vec<Movie>,

    // Loading flags
    loading_popular: bool,
    loading_now_playing: bool,
    loading_details: bool,
    searching: bool,

    // Pagination watermarks (highest page ever fetched, never decreased)
    popular_page: u32,
    now_playing_page: u32,
    search_page: u32,
    search_query: String,

    error: Option<String>,
}

impl MovieStore {
    pub fn new(client: Arc<dyn CatalogApi>) -> Self {
        Self {
            client,
            popular: Vec::new(),
            now_playing: Vec::new(),
            details: HashMap::new(),
            search_results: Vec::new(),
            loading_popular: false,
            loading_now_playing: false,
            loading_details: false,
            searching: false,
            popular_page: 0,
            now_playing_page: 0,
            search_page: 0,
            search_query: String::new(),
            error: None,
        }
    }

    pub fn has_popular(&self) -> bool {
        !self.popular.is_empty()
    }

    pub fn has_now_playing(&self) -> bool {
        !self.now_playing.is_empty()
    }

    /// Cached details for one movie, if present.
    pub fn movie_by_id(&self, id: u64) -> Option<&MovieDetails> {
        self.details.get(&id)
    }

    pub fn is_movie_loaded(&self, id: u64) -> bool {
        self.details.contains_key(&id)
    }

    /// Slice one page out of the cached popular list, clipped to what is
    /// available.
    pub fn popular_page_slice(&self, page: u32) -> &[Movie] {
        page_slice(&self.popular, page)
    }

    pub fn now_playing_page_slice(&self, page: u32) -> &[Movie] {
        page_slice(&self.now_playing, page)
    }

    pub fn search_results(&self) -> &[Movie] {
        &self.search_results
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn popular_page(&self) -> u32 {
        self.popular_page
    }

    pub fn now_playing_page(&self) -> u32 {
        self.now_playing_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading_popular || self.loading_now_playing || self.loading_details || self.searching
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch one page of popular movies.
    ///
    /// Pages at or below the watermark are served from cache unless
    /// `force_refresh` is set. A page-1 fetch replaces the whole list
    /// (refresh-to-top); later pages append new IDs in server order.
    /// Overlapping calls are not deduplicated here; callers own that.
    pub async fn fetch_popular(&mut self, page: u32, force_refresh: bool) -> Result<Vec<Movie>> {
        if !force_refresh && self.popular_page >= page && self.has_popular() {
            return Ok(self.popular_page_slice(page).to_vec());
        }

        self.loading_popular = true;
        self.error = None;

        let result = self.client.popular(page).await;
        self.loading_popular = false;

        match result {
            Ok(response) => {
                if page == 1 {
                    self.popular = response.results.clone();
                } else {
                    merge_by_id(&mut self.popular, &response.results);
                }
                self.popular_page = self.popular_page.max(page);
                Ok(response.results)
            }
            Err(err) => {
                self.error = Some(format!("Failed to fetch popular movies: {err}"));
                tracing::error!("Error fetching popular movies: {err}");
                Err(err)
            }
        }
    }

    /// Fetch the page after the current popular watermark.
    pub async fn load_more_popular(&mut self) -> Result<Vec<Movie>> {
        let next_page = self.popular_page + 1;
        self.fetch_popular(next_page, false).await
    }

    /// Fetch one page of now-playing movies. Same contract as
    /// [`Self::fetch_popular`], independent cache slot.
    pub async fn fetch_now_playing(&mut self, page: u32, force_refresh: bool) -> Result<Vec<Movie>> {
        if !force_refresh && self.now_playing_page >= page && self.has_now_playing() {
            return Ok(self.now_playing_page_slice(page).to_vec());
        }

        self.loading_now_playing = true;
        self.error = None;

        let result = self.client.now_playing(page).await;
        self.loading_now_playing = false;

        match result {
            Ok(response) => {
                if page == 1 {
                    self.now_playing = response.results.clone();
                } else {
                    merge_by_id(&mut self.now_playing, &response.results);
                }
                self.now_playing_page = self.now_playing_page.max(page);
                Ok(response.results)
            }
            Err(err) => {
                self.error = Some(format!("Failed to fetch now playing movies: {err}"));
                tracing::error!("Error fetching now playing movies: {err}");
                Err(err)
            }
        }
    }

    /// Fetch full details for one movie, keyed by ID. A cached entry is
    /// returned as-is unless `force_refresh` is set.
    pub async fn fetch_movie_details(&mut self, id: u64, force_refresh: bool) -> Result<MovieDetails> {
        if !force_refresh {
            if let Some(details) = self.details.get(&id) {
                return Ok(details.clone());
            }
        }

        self.loading_details = true;
        self.error = None;

        let result = self.client.movie_details(id).await;
        self.loading_details = false;

        match result {
            Ok(details) => {
                self.details.insert(id, details.clone());
                Ok(details)
            }
            Err(err) => {
                self.error = Some(format!("Failed to fetch movie details: {err}"));
                tracing::error!("Error fetching details for movie {id}: {err}");
                Err(err)
            }
        }
    }

    /// Search movies by text. A new query resets the result list and page
    /// counter; further pages of the same query merge by ID.
    pub async fn search_movies(&mut self, query: &str, page: u32) -> Result<Vec<Movie>> {
        if query != self.search_query {
            self.search_results.clear();
            self.search_page = 0;
        }

        self.searching = true;
        self.error = None;
        self.search_query = query.to_string();

        let result = self.client.search(query, page).await;
        self.searching = false;

        match result {
            Ok(response) => {
                if page == 1 {
                    self.search_results = response.results.clone();
                } else {
                    merge_by_id(&mut self.search_results, &response.results);
                }
                self.search_page = self.search_page.max(page);
                Ok(response.results)
            }
            Err(err) => {
                self.error = Some(format!("Search failed: {err}"));
                tracing::error!("Error searching movies for '{query}': {err}");
                Err(err)
            }
        }
    }

    /// Fetch cast and crew for one movie. Never cached.
    pub async fn fetch_movie_credits(&self, id: u64) -> Result<Credits> {
        self.client.movie_credits(id).await
    }

    /// Fetch movies similar to one movie. Never cached.
    pub async fn fetch_similar(&self, id: u64, page: u32) -> Result<PagedResponse<Movie>> {
        self.client.similar(id, page).await
    }

    /// Fetch the genre list. Never cached.
    pub async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        self.client.genres().await
    }

    /// Discover movies for a genre, most popular first. Never cached.
    pub async fn discover_by_genre(&self, genre_id: u64, page: u32) -> Result<PagedResponse<Movie>> {
        self.client.discover_by_genre(genre_id, page).await
    }

    /// Drop search results and query.
    pub fn clear_search(&mut self) {
        self.search_results.clear();
        self.search_query.clear();
        self.search_page = 0;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Reset every cache slot. The only way cached records are dropped.
    pub fn reset(&mut self) {
        *self = Self::new(self.client.clone());
    }
}

/// Slice `[(page-1)*PAGE_SIZE, page*PAGE_SIZE)` out of a cached list,
/// clipped to the available length.
fn page_slice(list: &[Movie], page: u32) -> &[Movie] {
    let start = (page.saturating_sub(1) as usize).saturating_mul(PAGE_SIZE);
    let end = start.saturating_add(PAGE_SIZE).min(list.len());
    if start >= list.len() {
        return &[];
    }
    &list[start..end]
}

/// Append movies whose IDs are not already present, preserving the incoming
/// order for new items.
fn merge_by_id(existing: &mut Vec<Movie>, fetched: &[Movie]) {
    for movie in fetched {
        if !existing.iter().any(|m| m.id == movie.id) {
            existing.push(movie.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: String::new(),
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            genre_ids: vec![],
            adult: false,
            original_language: "en".to_string(),
            original_title: String::new(),
            video: false,
        }
    }

    #[test]
    fn test_merge_by_id_skips_duplicates() {
        let mut existing = vec![movie(1), movie(2)];
        merge_by_id(&mut existing, &[movie(2), movie(3), movie(1), movie(4)]);

        let ids: Vec<u64> = existing.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_page_slice_clips_to_length() {
        let list: Vec<Movie> = (1..=25).map(movie).collect();

        assert_eq!(page_slice(&list, 1).len(), 20);
        assert_eq!(page_slice(&list, 2).len(), 5);
        assert_eq!(page_slice(&list, 2)[0].id, 21);
        assert!(page_slice(&list, 3).is_empty());
    }

    #[test]
    fn test_page_slice_empty_list() {
        assert!(page_slice(&[], 1).is_empty());
        assert!(page_slice(&[], 0).is_empty());
    }
}
