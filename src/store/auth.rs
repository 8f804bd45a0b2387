//! Auth store.
//!
//! Simulated session state: a fixed in-memory account directory, a bounded
//! login attempt counter, and an unsigned token with an embedded expiry.
//! Not a real authentication system and not to be hardened as one.

use crate::models::user::{PreferenceUpdate, Theme, User, UserPreferences};
use crate::storage::{Storage, KEY_AUTH_TOKEN, KEY_AUTH_USER, KEY_LAST_LOGIN};
use crate::store::token;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Attempt counter bound; once reached, logins are rejected until restart.
pub const MAX_LOGIN_ATTEMPTS: u8 = 5;

const LOGIN_LATENCY: Duration = Duration::from_millis(1000);
const REFRESH_LATENCY: Duration = Duration::from_millis(500);

const DEFAULT_AVATAR: &str = "https://i.pravatar.cc/150?img=0";

/// Emitted when a session transition affects other stores. The owning
/// context relays `Ended` to the favorites store; no favorites survive a
/// session change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SessionEvent {
    /// A stored session was restored intact.
    Restored,
    /// The session ended (explicit logout, failed restore, failed refresh).
    Ended,
}

/// Store for simulated session state.
#[derive(Default)]
pub struct AuthStore {
    user: Option<User>,
    token: Option<String>,
    is_authenticated: bool,
    loading: bool,
    error: Option<String>,
    login_attempts: u8,
    last_login_at: Option<DateTime<Utc>>,
}

/// The fixed directory of accounts the simulation accepts.
fn known_accounts() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "João Silva".to_string(),
            email: "joao@email.com".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=1".to_string()),
            preferences: UserPreferences {
                language: "pt-BR".to_string(),
                theme: Theme::Light,
                notifications: true,
            },
        },
        User {
            id: 2,
            name: "Maria Santos".to_string(),
            email: "maria@email.com".to_string(),
            avatar: Some("https://i.pravatar.cc/150?img=2".to_string()),
            preferences: UserPreferences {
                language: "pt-BR".to_string(),
                theme: Theme::Dark,
                notifications: false,
            },
        },
    ]
}

impl AuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_authenticated && self.token.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("guest")
    }

    pub fn avatar_url(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.avatar.as_deref())
            .unwrap_or(DEFAULT_AVATAR)
    }

    pub fn preferences(&self) -> UserPreferences {
        self.user
            .as_ref()
            .map(|u| u.preferences.clone())
            .unwrap_or_default()
    }

    pub fn can_attempt_login(&self) -> bool {
        self.login_attempts < MAX_LOGIN_ATTEMPTS
    }

    pub fn login_attempts(&self) -> u8 {
        self.login_attempts
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether the current token exists and its embedded expiry is in the
    /// future.
    pub fn has_valid_token(&self) -> bool {
        self.token
            .as_deref()
            .map(|t| token::is_valid(t, Utc::now()))
            .unwrap_or(false)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset_login_attempts(&mut self) {
        self.login_attempts = 0;
    }

    /// Restore a stored session, if one exists and its token is still
    /// time-valid. Anything less than a fully valid session forces logout;
    /// a half-valid session is never restored.
    pub fn initialize(&mut self, storage: &Storage) -> SessionEvent {
        let stored_token = storage.get(KEY_AUTH_TOKEN);
        let stored_user = storage.get(KEY_AUTH_USER);

        if let (Some(stored_token), Some(stored_user)) = (stored_token, stored_user) {
            if token::is_valid(&stored_token, Utc::now()) {
                match serde_json::from_str::<User>(&stored_user) {
                    Ok(user) => {
                        self.user = Some(user);
                        self.token = Some(stored_token);
                        self.is_authenticated = true;
                        self.last_login_at = storage
                            .get(KEY_LAST_LOGIN)
                            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
                            .map(|t| t.with_timezone(&Utc))
                            .or_else(|| Some(Utc::now()));
                        tracing::debug!("Restored session for {}", self.display_name());
                        return SessionEvent::Restored;
                    }
                    Err(err) => {
                        tracing::warn!("Stored user record unreadable, forcing logout: {err}");
                    }
                }
            }
        }

        self.end_session(storage);
        SessionEvent::Ended
    }

    /// Attempt a login against the fixed account directory.
    ///
    /// Once the attempt counter reaches its bound, calls are rejected
    /// immediately with a fixed message: no latency, no further counting.
    /// Bad credentials are recorded as a user-facing message, not an error.
    pub async fn login(&mut self, storage: &Storage, email: &str, password: &str) -> Result<bool> {
        if !self.can_attempt_login() {
            self.error = Some(Error::LoginLocked.to_string());
            return Ok(false);
        }

        self.loading = true;
        self.error = None;
        self.login_attempts += 1;

        // Simulated API latency
        tokio::time::sleep(LOGIN_LATENCY).await;

        let account = known_accounts().into_iter().find(|u| u.email == email);
        let account = match account {
            Some(account) if password.len() >= 3 => account,
            _ => {
                self.loading = false;
                self.error = Some(Error::InvalidCredentials.to_string());
                return Ok(false);
            }
        };

        let now = Utc::now();
        self.token = Some(token::issue(&account, now));
        self.user = Some(account);
        self.is_authenticated = true;
        self.last_login_at = Some(now);
        self.login_attempts = 0;

        let persisted = self.persist(storage);
        self.loading = false;

        match persisted {
            Ok(()) => Ok(true),
            Err(err) => {
                self.error = Some(format!("Login failed: {err}"));
                Err(err)
            }
        }
    }

    /// End the session: clear state, erase this store's durable keys.
    ///
    /// The returned event is the cross-store cleanup signal; the context
    /// relays it so favorites are cleared after this store is already done.
    pub fn logout(&mut self, storage: &Storage) -> SessionEvent {
        self.end_session(storage);
        SessionEvent::Ended
    }

    fn end_session(&mut self, storage: &Storage) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
        self.last_login_at = None;
        self.error = None;

        for key in [KEY_AUTH_TOKEN, KEY_AUTH_USER, KEY_LAST_LOGIN] {
            if let Err(err) = storage.remove(key) {
                tracing::warn!("Could not erase '{key}': {err}");
            }
        }
    }

    /// Reissue the token with a fresh expiry, without re-validating
    /// credentials. Returns `Ok(false)` when no user is present. A failure
    /// forces a full logout; a stale token is never left in place, and the
    /// caller must treat an error as a session end.
    pub async fn refresh_token(&mut self, storage: &Storage) -> Result<bool> {
        let Some(user) = self.user.clone() else {
            return Ok(false);
        };

        self.loading = true;

        // Simulated refresh latency
        tokio::time::sleep(REFRESH_LATENCY).await;

        self.token = Some(token::issue(&user, Utc::now()));

        let persisted = self.persist(storage);
        self.loading = false;

        match persisted {
            Ok(()) => Ok(true),
            Err(err) => {
                self.end_session(storage);
                self.error = Some(format!("Failed to renew session: {err}"));
                Err(err)
            }
        }
    }

    /// Merge a partial preference change into the current user and persist.
    /// A no-op without a user; a persistence failure is recorded, not
    /// propagated.
    pub fn update_preferences(&mut self, storage: &Storage, update: PreferenceUpdate) {
        let Some(user) = self.user.as_mut() else {
            return;
        };
        user.preferences.apply(update);

        if let Err(err) = self.persist(storage) {
            self.error = Some(format!("Failed to save preferences: {err}"));
            tracing::error!("Error persisting preferences: {err}");
        } else {
            self.error = None;
        }
    }

    fn persist(&self, storage: &Storage) -> Result<()> {
        let (Some(user), Some(session_token)) = (&self.user, &self.token) else {
            return Ok(());
        };
        storage.set(KEY_AUTH_TOKEN, session_token)?;
        storage.set(KEY_AUTH_USER, &serde_json::to_string(user)?)?;
        let last_login = self
            .last_login_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default();
        storage.set(KEY_LAST_LOGIN, &last_login)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_defaults() {
        let store = AuthStore::new();
        assert!(!store.is_logged_in());
        assert_eq!(store.display_name(), "guest");
        assert_eq!(store.avatar_url(), DEFAULT_AVATAR);
        assert!(store.can_attempt_login());
        assert_eq!(store.preferences(), UserPreferences::default());
    }

    #[test]
    fn test_known_accounts_have_unique_emails() {
        let accounts = known_accounts();
        assert_eq!(accounts.len(), 2);
        assert_ne!(accounts[0].email, accounts[1].email);
    }
}
