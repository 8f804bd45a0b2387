//! TMDB API client.
//!
//! Read-only, idempotent requests against the movie metadata service.
//! Transport failures propagate unchanged to the caller; recovery is the
//! stores' concern.

use crate::models::config::TmdbConfig;
use crate::models::movie::{Credits, Genre, GenreList, Movie, MovieDetails, PagedResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Local placeholder served when a record has no image path.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-movie.jpg";

/// Mid-resolution poster tier used when the caller has no preference.
pub const DEFAULT_IMAGE_SIZE: &str = "w500";

/// Catalog operations the stores depend on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn popular(&self, page: u32) -> Result<PagedResponse<Movie>>;
    async fn now_playing(&self, page: u32) -> Result<PagedResponse<Movie>>;
    async fn movie_details(&self, id: u64) -> Result<MovieDetails>;
    async fn movie_credits(&self, id: u64) -> Result<Credits>;
    async fn similar(&self, id: u64, page: u32) -> Result<PagedResponse<Movie>>;
    async fn search(&self, query: &str, page: u32) -> Result<PagedResponse<Movie>>;
    async fn genres(&self) -> Result<Vec<Genre>>;
    async fn discover_by_genre(&self, genre_id: u64, page: u32) -> Result<PagedResponse<Movie>>;
}

/// TMDB API client.
pub struct TmdbClient {
    api_key: String,
    language: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let api_key = config.api_key.ok_or(Error::TmdbApiKeyMissing)?;
        Ok(Self {
            api_key,
            language: config.language,
            client: reqwest::Client::new(),
        })
    }

    /// Create a new TMDB client from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(TmdbConfig::default())
    }

    /// Build a request URL. The configured credential and locale are
    /// authoritative: caller-supplied pairs with the same names are dropped.
    fn build_url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}?api_key={}&language={}", TMDB_BASE_URL, path, self.api_key, self.language);
        for (name, value) in params {
            if *name == "api_key" || *name == "language" {
                continue;
            }
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn popular(&self, page: u32) -> Result<PagedResponse<Movie>> {
        let url = self.build_url("/movie/popular", &[("page", page.to_string())]);
        self.get_json(&url).await
    }

    async fn now_playing(&self, page: u32) -> Result<PagedResponse<Movie>> {
        let url = self.build_url("/movie/now_playing", &[("page", page.to_string())]);
        self.get_json(&url).await
    }

    async fn movie_details(&self, id: u64) -> Result<MovieDetails> {
        let url = self.build_url(&format!("/movie/{}", id), &[]);
        self.get_json(&url).await
    }

    async fn movie_credits(&self, id: u64) -> Result<Credits> {
        let url = self.build_url(&format!("/movie/{}/credits", id), &[]);
        self.get_json(&url).await
    }

    async fn similar(&self, id: u64, page: u32) -> Result<PagedResponse<Movie>> {
        let url = self.build_url(&format!("/movie/{}/similar", id), &[("page", page.to_string())]);
        self.get_json(&url).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<PagedResponse<Movie>> {
        let url = self.build_url(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        );
        self.get_json(&url).await
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        let url = self.build_url("/genre/movie/list", &[]);
        let list: GenreList = self.get_json(&url).await?;
        Ok(list.genres)
    }

    async fn discover_by_genre(&self, genre_id: u64, page: u32) -> Result<PagedResponse<Movie>> {
        let url = self.build_url(
            "/discover/movie",
            &[
                ("with_genres", genre_id.to_string()),
                ("page", page.to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ],
        );
        self.get_json(&url).await
    }
}

/// Build an absolute image URL for a TMDB image path.
///
/// A missing path yields the local placeholder reference.
pub fn image_url(path: Option<&str>, size: &str) -> String {
    let Some(path) = path else {
        return PLACEHOLDER_IMAGE.to_string();
    };
    if path.starts_with('/') {
        format!("{}/{}{}", IMAGE_BASE_URL, size, path)
    } else {
        format!("{}/{}/{}", IMAGE_BASE_URL, size, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> TmdbClient {
        TmdbClient::new(TmdbConfig {
            api_key: Some("test-key".to_string()),
            language: "pt-BR".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let result = TmdbClient::new(TmdbConfig {
            api_key: None,
            language: "pt-BR".to_string(),
        });
        assert!(matches!(result, Err(Error::TmdbApiKeyMissing)));
    }

    #[test]
    fn test_build_url_fixed_params() {
        let client = test_client();
        let url = client.build_url("/movie/popular", &[("page", "2".to_string())]);
        assert_eq!(
            url,
            "https://api.themoviedb.org/3/movie/popular?api_key=test-key&language=pt-BR&page=2"
        );
    }

    #[test]
    fn test_build_url_caller_cannot_override_fixed_params() {
        let client = test_client();
        let url = client.build_url(
            "/search/movie",
            &[
                ("api_key", "evil".to_string()),
                ("language", "en-US".to_string()),
                ("query", "matrix".to_string()),
            ],
        );
        assert!(url.contains("api_key=test-key"));
        assert!(url.contains("language=pt-BR"));
        assert!(url.contains("query=matrix"));
        assert!(!url.contains("evil"));
        assert!(!url.contains("en-US"));
    }

    #[test]
    fn test_build_url_encodes_query_values() {
        let client = test_client();
        let url = client.build_url("/search/movie", &[("query", "blade runner".to_string())]);
        assert!(url.ends_with("query=blade%20runner"));
    }

    #[test]
    fn test_image_url() {
        assert_eq!(
            image_url(Some("/test.jpg"), "w500"),
            "https://image.tmdb.org/t/p/w500/test.jpg"
        );
    }

    #[test]
    fn test_image_url_adds_leading_slash() {
        assert_eq!(
            image_url(Some("test.jpg"), DEFAULT_IMAGE_SIZE),
            "https://image.tmdb.org/t/p/w500/test.jpg"
        );
    }

    #[test]
    fn test_image_url_placeholder_for_missing_path() {
        assert_eq!(image_url(None, DEFAULT_IMAGE_SIZE), PLACEHOLDER_IMAGE);
    }
}
