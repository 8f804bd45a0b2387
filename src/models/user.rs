//! User account models.

use serde::{Deserialize, Serialize};

/// A user account. Owned exclusively by the auth store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub preferences: UserPreferences,
}

/// Per-user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub language: String,
    pub theme: Theme,
    pub notifications: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            language: "pt-BR".to_string(),
            theme: Theme::Light,
            notifications: true,
        }
    }
}

/// UI theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Partial preference change; unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct PreferenceUpdate {
    pub language: Option<String>,
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
}

impl UserPreferences {
    /// Merge a partial update into these preferences.
    pub fn apply(&mut self, update: PreferenceUpdate) {
        if let Some(language) = update.language {
            self.language = language;
        }
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(notifications) = update.notifications {
            self.notifications = notifications;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
    }

    #[test]
    fn test_preferences_apply_partial() {
        let mut prefs = UserPreferences::default();
        prefs.apply(PreferenceUpdate {
            theme: Some(Theme::Dark),
            ..Default::default()
        });
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.language, "pt-BR");
        assert!(prefs.notifications);
    }
}
