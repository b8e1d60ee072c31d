pub mod models;
pub mod test_utils;

pub use sea_orm::DbErr;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use tracing::info;
use util::config;

/// Resolves `DATABASE_PATH` into a connection URL. A value that is already a
/// DSN is used as-is; anything else is treated as a SQLite file path.
pub fn database_url(path_or_url: &str) -> String {
    if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url.to_string()
    } else {
        // Ensure parent directory exists (SQLite won't create intermediate dirs).
        if let Some(parent) = Path::new(path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    }
}

pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let url = database_url(&config::database_path());
    info!(url = %url, "Connecting to database");

    let mut options = ConnectOptions::new(url);
    options.sqlx_logging(false);
    Database::connect(options).await
}
