//! Client-side state stores.
//!
//! Each store owns one slice of application state and is held by the
//! [`crate::app::App`] context. Stores never reach each other directly; the
//! one cross-store rule (favorites are dropped when a session ends) is
//! relayed through [`auth::SessionEvent`] by the context.

pub mod auth;
pub mod favorites;
pub mod movies;
pub mod token;

pub use auth::{AuthStore, SessionEvent};
pub use favorites::{FavoritesBackup, FavoritesStore};
pub use movies::MovieStore;
