use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Opens the results store as a read-only connection pool.
///
/// The store is never created or migrated here: a missing or unreadable file
/// is reported as `DbError::StoreUnavailable`, which callers treat as fatal at
/// startup.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|e| DbError::ConnectionConfigError(e.to_string()))?
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(options)
        .await
        .map_err(|source| DbError::StoreUnavailable {
            url: settings.url.clone(),
            source,
        })?;

    tracing::info!(url = %settings.url, max_connections = settings.max_connections, "Results store opened read-only.");
    Ok(pool)
}

/// Releases every pooled connection. Called once at shutdown.
pub async fn close(pool: &SqlitePool) {
    pool.close().await;
    tracing::info!("Results store closed.");
}
