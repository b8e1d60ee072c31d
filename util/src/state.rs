//! Application state container shared across Axum route handlers and services.
//!
//! This struct holds shared resources such as the database connection and the
//! location of the translation files. It is cheap to clone and is passed into
//! route handlers via Axum's `State<T>` extractor.

use crate::config;
use sea_orm::DatabaseConnection;
use std::path::PathBuf;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    translations_root: PathBuf,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection, reading the
    /// translation root from configuration.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            translations_root: PathBuf::from(config::translations_root()),
        }
    }

    /// Overrides the directory that holds translation JSON files.
    pub fn with_translations_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.translations_root = root.into();
        self
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    pub fn translations_root(&self) -> &PathBuf {
        &self.translations_root
    }
}
