//! Integration tests for the movie cache and favorites stores.
//!
//! Tests cover:
//! - Cache-hit short-circuiting and request counting
//! - Page merge with ID dedup
//! - Search query resets
//! - Favorites hydration through the cache

use async_trait::async_trait;
use movie_shelf::app::App;
use movie_shelf::models::movie::{Credits, Genre, Movie, MovieDetails, PagedResponse};
use movie_shelf::services::tmdb::CatalogApi;
use movie_shelf::storage::Storage;
use movie_shelf::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn movie(id: u64) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        overview: "overview".to_string(),
        poster_path: Some(format!("/poster-{id}.jpg")),
        backdrop_path: None,
        release_date: "2024-06-01".to_string(),
        vote_average: 7.0,
        vote_count: 100,
        popularity: 50.0,
        genre_ids: vec![18],
        adult: false,
        original_language: "en".to_string(),
        original_title: format!("Movie {id}"),
        video: false,
    }
}

fn details(id: u64) -> MovieDetails {
    MovieDetails {
        movie: movie(id),
        runtime: Some(120),
        genres: vec![Genre {
            id: 18,
            name: "Drama".to_string(),
        }],
        budget: 1_000_000,
        revenue: 5_000_000,
        homepage: None,
        imdb_id: None,
        production_companies: vec![],
        production_countries: vec![],
        spoken_languages: vec![],
        status: "Released".to_string(),
        tagline: None,
    }
}

fn paged(page: u32, results: Vec<Movie>) -> PagedResponse<Movie> {
    PagedResponse {
        page,
        results,
        total_pages: 10,
        total_results: 200,
    }
}

/// Catalog fake with canned pages and call counters.
#[derive(Default)]
struct FakeCatalog {
    popular_calls: AtomicUsize,
    now_playing_calls: AtomicUsize,
    details_calls: AtomicUsize,
    search_calls: AtomicUsize,
    /// Detail fetches for these IDs fail with a transport-style error.
    broken_ids: Vec<u64>,
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn popular(&self, page: u32) -> Result<PagedResponse<Movie>> {
        self.popular_calls.fetch_add(1, Ordering::SeqCst);
        // Page 2 overlaps page 1 by one movie to exercise the dedup merge.
        let results = match page {
            1 => (1..=20).map(movie).collect(),
            2 => vec![movie(20), movie(21), movie(22)],
            _ => vec![],
        };
        Ok(paged(page, results))
    }

    async fn now_playing(&self, page: u32) -> Result<PagedResponse<Movie>> {
        self.now_playing_calls.fetch_add(1, Ordering::SeqCst);
        Ok(paged(page, vec![movie(50), movie(51)]))
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken_ids.contains(&id) {
            return Err(Error::Api {
                status: 500,
                message: "upstream error".to_string(),
            });
        }
        Ok(details(id))
    }

    async fn movie_credits(&self, id: u64) -> Result<Credits> {
        Ok(Credits {
            id,
            cast: vec![],
            crew: vec![],
        })
    }

    async fn similar(&self, _id: u64, page: u32) -> Result<PagedResponse<Movie>> {
        Ok(paged(page, vec![movie(90)]))
    }

    async fn search(&self, query: &str, page: u32) -> Result<PagedResponse<Movie>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let results = match (query, page) {
            ("matrix", 1) => vec![movie(100), movie(101)],
            ("matrix", 2) => vec![movie(101), movie(102)],
            ("blade", 1) => vec![movie(200)],
            _ => vec![],
        };
        Ok(paged(page, results))
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        Ok(vec![Genre {
            id: 18,
            name: "Drama".to_string(),
        }])
    }

    async fn discover_by_genre(&self, _genre_id: u64, page: u32) -> Result<PagedResponse<Movie>> {
        Ok(paged(page, vec![movie(70)]))
    }
}

fn test_app(catalog: FakeCatalog, dir: &TempDir) -> (App, Arc<FakeCatalog>) {
    let catalog = Arc::new(catalog);
    let storage = Storage::open(dir.path()).unwrap();
    let app = App::with_client(catalog.clone(), storage);
    (app, catalog)
}

// ========== MOVIE CACHE TESTS ==========

#[tokio::test]
async fn test_popular_cache_hit_issues_one_request() {
    let dir = TempDir::new().unwrap();
    let (mut app, catalog) = test_app(FakeCatalog::default(), &dir);

    let first = app.movies.fetch_popular(1, false).await.unwrap();
    let second = app.movies.fetch_popular(1, false).await.unwrap();

    assert_eq!(catalog.popular_calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.len(), 20);
    assert_eq!(second.len(), 20);
}

#[tokio::test]
async fn test_popular_force_refresh_bypasses_cache() {
    let dir = TempDir::new().unwrap();
    let (mut app, catalog) = test_app(FakeCatalog::default(), &dir);

    app.movies.fetch_popular(1, false).await.unwrap();
    app.movies.fetch_popular(1, true).await.unwrap();

    assert_eq!(catalog.popular_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_popular_page_two_appends_without_duplicates() {
    let dir = TempDir::new().unwrap();
    let (mut app, _catalog) = test_app(FakeCatalog::default(), &dir);

    app.movies.fetch_popular(1, false).await.unwrap();
    app.movies.fetch_popular(2, false).await.unwrap();

    // Movie 20 appears on both server pages but only once in the cache.
    let page_two: Vec<u64> = app
        .movies
        .popular_page_slice(2)
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(page_two, vec![21, 22]);
    assert_eq!(app.movies.popular_page(), 2);
}

#[tokio::test]
async fn test_popular_watermark_never_decreases() {
    let dir = TempDir::new().unwrap();
    let (mut app, catalog) = test_app(FakeCatalog::default(), &dir);

    app.movies.fetch_popular(1, false).await.unwrap();
    app.movies.fetch_popular(2, false).await.unwrap();
    // Back to page 1 without force: served from cache.
    app.movies.fetch_popular(1, false).await.unwrap();

    assert_eq!(app.movies.popular_page(), 2);
    assert_eq!(catalog.popular_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_fetch_preserves_cache_and_clears_loading() {
    let dir = TempDir::new().unwrap();
    let (mut app, _catalog) = test_app(
        FakeCatalog {
            broken_ids: vec![666],
            ..Default::default()
        },
        &dir,
    );

    app.movies.fetch_movie_details(1, false).await.unwrap();
    let result = app.movies.fetch_movie_details(666, false).await;

    assert!(result.is_err());
    assert!(app.movies.error().is_some());
    assert!(!app.movies.is_loading());
    // Earlier cached entry untouched
    assert!(app.movies.is_movie_loaded(1));
    assert!(!app.movies.is_movie_loaded(666));
}

#[tokio::test]
async fn test_details_cache_hit_and_force_refresh() {
    let dir = TempDir::new().unwrap();
    let (mut app, catalog) = test_app(FakeCatalog::default(), &dir);

    app.movies.fetch_movie_details(7, false).await.unwrap();
    app.movies.fetch_movie_details(7, false).await.unwrap();
    assert_eq!(catalog.details_calls.load(Ordering::SeqCst), 1);

    app.movies.fetch_movie_details(7, true).await.unwrap();
    assert_eq!(catalog.details_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_new_search_query_resets_results() {
    let dir = TempDir::new().unwrap();
    let (mut app, _catalog) = test_app(FakeCatalog::default(), &dir);

    app.movies.search_movies("matrix", 1).await.unwrap();
    app.movies.search_movies("matrix", 2).await.unwrap();

    let ids: Vec<u64> = app.movies.search_results().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![100, 101, 102]);

    app.movies.search_movies("blade", 1).await.unwrap();
    let ids: Vec<u64> = app.movies.search_results().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![200]);
    assert_eq!(app.movies.search_query(), "blade");
}

#[tokio::test]
async fn test_reset_clears_every_slot() {
    let dir = TempDir::new().unwrap();
    let (mut app, _catalog) = test_app(FakeCatalog::default(), &dir);

    app.movies.fetch_popular(1, false).await.unwrap();
    app.movies.fetch_movie_details(3, false).await.unwrap();
    app.movies.search_movies("matrix", 1).await.unwrap();

    app.movies.reset();

    assert!(!app.movies.has_popular());
    assert!(!app.movies.is_movie_loaded(3));
    assert!(app.movies.search_results().is_empty());
    assert_eq!(app.movies.popular_page(), 0);
}

// ========== FAVORITES HYDRATION TESTS ==========

#[tokio::test]
async fn test_hydration_prefers_cache_and_skips_failures() {
    let dir = TempDir::new().unwrap();
    let (mut app, catalog) = test_app(
        FakeCatalog {
            broken_ids: vec![666],
            ..Default::default()
        },
        &dir,
    );

    // Movie 1 is already cached; 666 fails; 2 resolves over the wire.
    app.movies.fetch_movie_details(1, false).await.unwrap();
    app.favorites.add_to_favorites(&app.storage, movie(1));
    app.favorites.add_to_favorites(&app.storage, movie(666));
    app.favorites.add_to_favorites(&app.storage, movie(2));

    app.favorites.load_movie_details(&mut app.movies).await;

    let snapshot_ids: Vec<u64> = app.favorites.movies().iter().map(|m| m.id).collect();
    assert_eq!(snapshot_ids, vec![1, 2]);
    // The ID list itself is untouched by a failed resolution.
    assert_eq!(app.favorites.ids(), &[1, 666, 2]);
    // One attempt for 666, one fetch for 2, none for cached 1.
    assert_eq!(catalog.details_calls.load(Ordering::SeqCst), 3);
    assert!(!app.favorites.is_loading());
}

#[tokio::test]
async fn test_hydration_replaces_snapshots_wholesale() {
    let dir = TempDir::new().unwrap();
    let (mut app, _catalog) = test_app(FakeCatalog::default(), &dir);

    app.favorites.add_to_favorites(&app.storage, movie(5));

    // A reloaded store knows the IDs but has no snapshots until hydration.
    let storage = Storage::open(dir.path()).unwrap();
    app.favorites.initialize(&storage);
    assert!(app.favorites.movies().is_empty());

    app.favorites.load_movie_details(&mut app.movies).await;
    assert_eq!(app.favorites.movies().len(), 1);
    assert_eq!(app.favorites.movies()[0].id, 5);
}
