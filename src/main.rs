//! Movie Shelf CLI
//!
//! A command-line movie browser backed by TMDB, with a local favorites shelf
//! and a simulated login.

use clap::Parser;
use movie_shelf::app::App;
use movie_shelf::cli::{
    args::{Cli, Commands, FavoritesAction},
    commands::{account, browse, details, export_import, favorites, search},
};
use movie_shelf::models::config::load_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = load_config();
    let mut app = App::new(&config)?;
    app.initialize();

    // Run the appropriate command
    match cli.command {
        Commands::Popular { page, force } => {
            browse::execute_popular(&mut app, page, force).await?;
        }

        Commands::NowPlaying { page, force } => {
            browse::execute_now_playing(&mut app, page, force).await?;
        }

        Commands::Search { query, page } => {
            search::execute_search(&mut app, &query, page).await?;
        }

        Commands::Details { movie_id, force, credits } => {
            details::execute_details(&mut app, movie_id, force, credits).await?;
        }

        Commands::Similar { movie_id, page } => {
            browse::execute_similar(&app, movie_id, page).await?;
        }

        Commands::Genres => {
            browse::execute_genres(&app).await?;
        }

        Commands::Discover { genre, page } => {
            browse::execute_discover(&app, genre, page).await?;
        }

        Commands::Favorites { action } => match action {
            FavoritesAction::List => favorites::execute_list(&mut app).await?,
            FavoritesAction::Add { movie_id } => favorites::execute_add(&mut app, movie_id).await?,
            FavoritesAction::Remove { movie_id } => {
                favorites::execute_remove(&mut app, movie_id).await?;
            }
            FavoritesAction::Toggle { movie_id } => {
                favorites::execute_toggle(&mut app, movie_id).await?;
            }
            FavoritesAction::Clear => favorites::execute_clear(&mut app).await?,
            FavoritesAction::Sync => favorites::execute_sync(&mut app).await?,
        },

        Commands::Export { output } => {
            export_import::execute_export(&mut app, output).await?;
        }

        Commands::Import { backup_file } => {
            export_import::execute_import(&mut app, &backup_file).await?;
        }

        Commands::Login { email, password } => {
            account::execute_login(&mut app, &email, &password).await?;
        }

        Commands::Logout => {
            account::execute_logout(&mut app).await?;
        }

        Commands::Refresh => {
            account::execute_refresh(&mut app).await?;
        }

        Commands::Whoami => {
            account::execute_whoami(&app).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("movie_shelf=debug")
    } else {
        EnvFilter::new("movie_shelf=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
