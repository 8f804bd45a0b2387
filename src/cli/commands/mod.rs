//! CLI command implementations.

pub mod account;
pub mod browse;
pub mod details;
pub mod export_import;
pub mod favorites;
pub mod search;

use crate::app::App;
use crate::models::movie::Movie;
use crate::services::tmdb::{image_url, DEFAULT_IMAGE_SIZE};
use anyhow::bail;
use colored::Colorize;

/// Reject commands that need a session. The CLI analog of the route guard:
/// consumes only the logged-in boolean.
pub fn require_login(app: &App) -> anyhow::Result<()> {
    if !app.is_logged_in() {
        bail!("You need to be logged in. Run: movie-shelf login --email <EMAIL> --password <PASSWORD>");
    }
    Ok(())
}

/// Print a numbered movie listing.
pub fn print_movie_list(movies: &[Movie]) {
    if movies.is_empty() {
        println!("{}", "No movies to show.".yellow());
        return;
    }

    for (position, movie) in movies.iter().enumerate() {
        let year = movie.year().unwrap_or("----");
        println!(
            "{:>3}. {} ({}) {}",
            position + 1,
            movie.title.bold(),
            year,
            format!("{:.1}/10", movie.vote_average).cyan()
        );
        println!(
            "     id {}  poster {}",
            movie.id,
            image_url(movie.poster_path.as_deref(), DEFAULT_IMAGE_SIZE)
        );
    }
}
