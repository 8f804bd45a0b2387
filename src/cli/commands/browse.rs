//! Listing commands: popular, now playing, genres, discover, similar.

use super::print_movie_list;
use crate::app::App;
use anyhow::Result;
use colored::Colorize;

/// Execute the popular command.
pub async fn execute_popular(app: &mut App, page: u32, force: bool) -> Result<()> {
    let movies = app.movies.fetch_popular(page, force).await?;
    println!("{}", format!("Popular movies - page {page}").bold().cyan());
    println!();
    print_movie_list(&movies);
    Ok(())
}

/// Execute the now-playing command.
pub async fn execute_now_playing(app: &mut App, page: u32, force: bool) -> Result<()> {
    let movies = app.movies.fetch_now_playing(page, force).await?;
    println!("{}", format!("Now playing - page {page}").bold().cyan());
    println!();
    print_movie_list(&movies);
    Ok(())
}

/// Execute the genres command.
pub async fn execute_genres(app: &App) -> Result<()> {
    let genres = app.movies.fetch_genres().await?;
    println!("{}", "Genres".bold().cyan());
    for genre in genres {
        println!("  {:>5}  {}", genre.id, genre.name);
    }
    Ok(())
}

/// Execute the discover command.
pub async fn execute_discover(app: &App, genre_id: u64, page: u32) -> Result<()> {
    let response = app.movies.discover_by_genre(genre_id, page).await?;
    println!(
        "{}",
        format!("Discover - genre {genre_id}, page {page}").bold().cyan()
    );
    println!();
    print_movie_list(&response.results);
    Ok(())
}

/// Execute the similar command.
pub async fn execute_similar(app: &App, movie_id: u64, page: u32) -> Result<()> {
    let response = app.movies.fetch_similar(movie_id, page).await?;
    println!(
        "{}",
        format!("Similar to movie {movie_id} - page {page}").bold().cyan()
    );
    println!();
    print_movie_list(&response.results);
    Ok(())
}
