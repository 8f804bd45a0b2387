//! Details command implementation.

use crate::app::App;
use crate::services::tmdb::{image_url, DEFAULT_IMAGE_SIZE};
use anyhow::Result;
use colored::Colorize;

/// Execute the details command.
pub async fn execute_details(app: &mut App, movie_id: u64, force: bool, credits: bool) -> Result<()> {
    let details = app.movies.fetch_movie_details(movie_id, force).await?;

    println!("{}", details.movie.title.bold().cyan());
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        println!("{}", tagline.italic());
    }
    println!();

    if let Some(year) = details.movie.year() {
        println!("  Released: {} ({})", details.movie.release_date, year);
    }
    if let Some(runtime) = details.runtime {
        println!("  Runtime: {runtime} min");
    }
    println!(
        "  Rating: {:.1}/10 ({} votes)",
        details.movie.vote_average, details.movie.vote_count
    );
    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        println!("  Genres: {}", names.join(", "));
    }
    if !details.status.is_empty() {
        println!("  Status: {}", details.status);
    }
    if details.budget > 0 {
        println!("  Budget: ${}", details.budget);
    }
    if details.revenue > 0 {
        println!("  Revenue: ${}", details.revenue);
    }
    println!(
        "  Poster: {}",
        image_url(details.movie.poster_path.as_deref(), DEFAULT_IMAGE_SIZE)
    );
    println!();
    println!("{}", details.movie.overview);

    if credits {
        let credits = app.movies.fetch_movie_credits(movie_id).await?;
        println!();
        println!("{}", "Cast".bold());
        for member in credits.cast.iter().take(10) {
            println!("  {} as {}", member.name, member.character);
        }
        let directors: Vec<&str> = credits
            .crew
            .iter()
            .filter(|c| c.job == "Director")
            .map(|c| c.name.as_str())
            .collect();
        if !directors.is_empty() {
            println!();
            println!("{} {}", "Directed by".bold(), directors.join(", "));
        }
    }

    Ok(())
}
