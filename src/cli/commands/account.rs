//! Account command implementations: login, logout, refresh, whoami.

use crate::app::App;
use anyhow::Result;
use colored::Colorize;

/// Execute the login command.
pub async fn execute_login(app: &mut App, email: &str, password: &str) -> Result<()> {
    println!("{}", "Signing in...".cyan());

    if app.login(email, password).await? {
        println!(
            "{} Welcome, {}",
            "[OK]".bold().green(),
            app.auth.display_name().bold()
        );
        return Ok(());
    }

    let message = app.auth.error().unwrap_or("Login failed");
    println!("{} {}", "[FAIL]".bold().red(), message);
    Ok(())
}

/// Execute the logout command.
pub async fn execute_logout(app: &mut App) -> Result<()> {
    if !app.is_logged_in() {
        println!("{}", "No active session.".yellow());
        return Ok(());
    }

    let name = app.auth.display_name().to_string();
    app.logout();
    println!("{} Signed out {name}. Favorites cleared.", "[OK]".bold().green());
    Ok(())
}

/// Execute the refresh command.
pub async fn execute_refresh(app: &mut App) -> Result<()> {
    match app.refresh_session().await {
        Ok(true) => {
            println!("{} Session renewed for 24 hours", "[OK]".bold().green());
        }
        Ok(false) => {
            println!("{}", "No active session.".yellow());
        }
        Err(err) => {
            println!("{} Session ended: {err}", "[FAIL]".bold().red());
        }
    }
    Ok(())
}

/// Execute the whoami command.
pub async fn execute_whoami(app: &App) -> Result<()> {
    let Some(user) = app.auth.current_user() else {
        println!("{}", "Not logged in.".yellow());
        return Ok(());
    };

    println!("{}", user.name.bold().cyan());
    println!("  Email: {}", user.email);
    println!("  Avatar: {}", app.auth.avatar_url());
    let prefs = app.auth.preferences();
    println!(
        "  Preferences: language {}, theme {:?}, notifications {}",
        prefs.language, prefs.theme, prefs.notifications
    );
    if let Some(last_login) = app.auth.last_login_at() {
        println!("  Last login: {}", last_login.to_rfc3339());
    }
    println!(
        "  Token valid: {}",
        if app.auth.has_valid_token() { "yes" } else { "no" }
    );
    Ok(())
}
