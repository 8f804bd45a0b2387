//! Export and import command implementations.

use super::require_login;
use crate::app::App;
use crate::store::FavoritesBackup;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Execute the export command.
pub async fn execute_export(app: &mut App, output: Option<PathBuf>) -> Result<()> {
    require_login(app)?;

    let output_path = output.unwrap_or_else(|| PathBuf::from("favorites-backup.json"));

    println!("{}", "[EXPORT] Collecting favorites...".bold().cyan());

    // Fill the snapshots so the backup is self-contained.
    app.favorites.load_movie_details(&mut app.movies).await;

    let backup = app.favorites.export_favorites();
    let json = serde_json::to_string_pretty(&backup)?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!();
    println!("{}", "[OK] Export successful!".bold().green());
    println!("  File: {}", output_path.display());
    println!("  Contents: {} movies", backup.ids.len());
    println!();
    println!(
        "Tip: Import command: movie-shelf import {}",
        output_path.display()
    );
    Ok(())
}

/// Execute the import command.
pub async fn execute_import(app: &mut App, backup_file: &Path) -> Result<()> {
    require_login(app)?;

    println!("{}", "[IMPORT] Reading backup file...".bold().cyan());

    let content = std::fs::read_to_string(backup_file)
        .with_context(|| format!("reading {}", backup_file.display()))?;
    let backup: FavoritesBackup =
        serde_json::from_str(&content).context("backup file is not a favorites backup")?;

    println!();
    println!("Backup information:");
    println!("  Version: {}", backup.version);
    println!("  Created: {}", backup.exported_at);
    println!("  Movies: {}", backup.ids.len());
    println!();

    let count = backup.ids.len();
    app.favorites.import_favorites(&app.storage, backup)?;

    println!("{} Imported {count} favorites", "[OK]".bold().green());
    Ok(())
}
