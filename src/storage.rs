//! Durable key-value storage.
//!
//! A flat string-keyed namespace persisted as one file per key under a root
//! directory. Survives process restarts; scoped to the local machine.

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Durable key for the session token.
pub const KEY_AUTH_TOKEN: &str = "auth-token";
/// Durable key for the authenticated user record (JSON).
pub const KEY_AUTH_USER: &str = "auth-user";
/// Durable key for the last login timestamp (RFC 3339).
pub const KEY_LAST_LOGIN: &str = "last-login";
/// Durable key for the favorite movie IDs (JSON array).
pub const KEY_FAVORITES: &str = "movie-favorites";

/// Flat key-value store backed by files.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Open (and create if needed) a storage directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Read the value stored under a key, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    /// Store a value under a key, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.key_path(key), value)
            .map_err(|e| Error::storage(key, e.to_string()))
    }

    /// Remove a key. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| Error::storage(key, e.to_string()))?;
        }
        Ok(())
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }

    /// The root directory backing this store.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
