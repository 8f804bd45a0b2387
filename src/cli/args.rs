//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Movie Shelf - Browse TMDB and keep a local favorites shelf
#[derive(Parser, Debug)]
#[command(name = "movie-shelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List popular movies
    Popular {
        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Bypass the cache and fetch fresh data
        #[arg(long)]
        force: bool,
    },

    /// List movies now playing in theaters
    NowPlaying {
        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Bypass the cache and fetch fresh data
        #[arg(long)]
        force: bool,
    },

    /// Search movies by title
    Search {
        /// Search text
        #[arg(value_name = "QUERY")]
        query: String,

        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show full details for one movie
    Details {
        /// TMDB movie ID
        #[arg(value_name = "MOVIE_ID")]
        movie_id: u64,

        /// Bypass the cache and fetch fresh data
        #[arg(long)]
        force: bool,

        /// Also show cast and crew
        #[arg(long)]
        credits: bool,
    },

    /// List movies similar to one movie
    Similar {
        /// TMDB movie ID
        #[arg(value_name = "MOVIE_ID")]
        movie_id: u64,

        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// List movie genres
    Genres,

    /// Discover movies by genre, most popular first
    Discover {
        /// Genre ID (see `genres`)
        #[arg(short, long)]
        genre: u64,

        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Manage the favorites shelf (requires login)
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Export the favorites shelf to a backup file
    Export {
        /// Output file path (default: favorites-backup.json)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Import a favorites backup file, replacing the shelf
    Import {
        /// Path to the backup file
        #[arg(value_name = "BACKUP_FILE")]
        backup_file: PathBuf,
    },

    /// Log in with a simulated account
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Log out and clear the favorites shelf
    Logout,

    /// Renew the session token
    Refresh,

    /// Show the current session
    Whoami,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// List bookmarked movies
    List,

    /// Add a movie by ID
    Add {
        #[arg(value_name = "MOVIE_ID")]
        movie_id: u64,
    },

    /// Remove a movie by ID
    Remove {
        #[arg(value_name = "MOVIE_ID")]
        movie_id: u64,
    },

    /// Add or remove a movie by ID depending on membership
    Toggle {
        #[arg(value_name = "MOVIE_ID")]
        movie_id: u64,
    },

    /// Remove every bookmark
    Clear,

    /// Refresh the stored snapshots for every bookmark
    Sync,
}
