//! Favorites command implementations.

use super::{print_movie_list, require_login};
use crate::app::App;
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Execute the favorites list command.
pub async fn execute_list(app: &mut App) -> Result<()> {
    require_login(app)?;

    if !app.favorites.has_favorites() {
        println!("{}", "Your shelf is empty.".yellow());
        return Ok(());
    }

    // Snapshots live in memory only; rehydrate before printing.
    app.favorites.load_movie_details(&mut app.movies).await;

    println!(
        "{}",
        format!("Favorites ({})", app.favorites.count()).bold().cyan()
    );
    println!();
    print_movie_list(&app.favorites.recent_first());
    Ok(())
}

/// Execute the favorites add command.
pub async fn execute_add(app: &mut App, movie_id: u64) -> Result<()> {
    require_login(app)?;

    if app.favorites.is_favorite(movie_id) {
        println!("Movie {movie_id} is already on the shelf.");
        return Ok(());
    }

    let details = app.movies.fetch_movie_details(movie_id, false).await?;
    let title = details.movie.title.clone();

    if app.favorites.add_to_favorites(&app.storage, details.summary()) {
        println!("{} Added '{title}'", "[OK]".bold().green());
    } else if let Some(error) = app.favorites.error() {
        println!("{} {}", "[FAIL]".bold().red(), error);
    }
    Ok(())
}

/// Execute the favorites remove command.
pub async fn execute_remove(app: &mut App, movie_id: u64) -> Result<()> {
    require_login(app)?;

    if !app.favorites.is_favorite(movie_id) {
        println!("Movie {movie_id} is not on the shelf.");
        return Ok(());
    }

    app.favorites.remove_from_favorites(&app.storage, movie_id);
    println!("{} Removed movie {movie_id}", "[OK]".bold().green());
    Ok(())
}

/// Execute the favorites toggle command.
pub async fn execute_toggle(app: &mut App, movie_id: u64) -> Result<()> {
    require_login(app)?;

    if app.favorites.is_favorite(movie_id) {
        app.favorites.remove_from_favorites(&app.storage, movie_id);
        println!("{} Removed movie {movie_id}", "[OK]".bold().green());
        return Ok(());
    }
    execute_add(app, movie_id).await
}

/// Execute the favorites clear command.
pub async fn execute_clear(app: &mut App) -> Result<()> {
    require_login(app)?;

    let count = app.favorites.count();
    app.favorites.clear_all(&app.storage);
    println!("{} Cleared {count} favorites", "[OK]".bold().green());
    Ok(())
}

/// Execute the favorites sync command: refresh every snapshot.
pub async fn execute_sync(app: &mut App) -> Result<()> {
    require_login(app)?;

    if !app.favorites.has_favorites() {
        println!("{}", "Your shelf is empty.".yellow());
        return Ok(());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Resolving {} favorites...", app.favorites.count()));
    pb.enable_steady_tick(Duration::from_millis(100));

    app.favorites.load_movie_details(&mut app.movies).await;

    pb.finish_with_message("Done!");

    let resolved = app.favorites.movies().len();
    let missing = app.favorites.count() - resolved;
    println!("{} {resolved} resolved, {missing} skipped", "[OK]".bold().green());
    Ok(())
}
