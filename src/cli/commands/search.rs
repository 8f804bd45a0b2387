//! Search command implementation.

use super::print_movie_list;
use crate::app::App;
use anyhow::Result;
use colored::Colorize;

/// Execute the search command.
pub async fn execute_search(app: &mut App, query: &str, page: u32) -> Result<()> {
    let movies = app.movies.search_movies(query, page).await?;

    println!(
        "{}",
        format!("Search results for '{query}' - page {page}").bold().cyan()
    );
    println!();
    print_movie_list(&movies);

    Ok(())
}
