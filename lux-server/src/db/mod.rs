//! Database access layer for luxserver
//!
//! All connections are read-only; the collection is owned by whoever
//! loaded it.

use lux_common::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

/// Connect to the collection database in read-only mode
///
/// Fails if the file is missing or the collection tables cannot be read,
/// so an unusable store is caught at startup rather than on first request.
pub async fn connect_readonly(db_path: &Path, max_connections: u32) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::Config(format!(
            "Database not found: {}",
            db_path.display()
        )));
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    let object_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM objects")
        .fetch_one(&pool)
        .await?;
    info!(
        "Opened {} read-only ({} objects)",
        db_path.display(),
        object_count
    );

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_common::db::init_collection_database;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_database_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = connect_readonly(&dir.path().join("absent.sqlite"), 1)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Database not found"));
        assert!(!dir.path().join("absent.sqlite").exists(), "Must not create the file");
    }

    #[tokio::test]
    async fn test_database_without_collection_tables_is_rejected() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("empty.sqlite");
        std::fs::File::create(&db_path).unwrap();

        let err = connect_readonly(&db_path, 1).await.unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[tokio::test]
    async fn test_readonly_connection() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("lux.sqlite");
        init_collection_database(&db_path).await.unwrap().close().await;

        let pool = connect_readonly(&db_path, 2)
            .await
            .expect("Should connect in read-only mode");

        let result = sqlx::query("INSERT INTO objects (id, label, date) VALUES (1, 'x', 'y')")
            .execute(&pool)
            .await;
        assert!(result.is_err(), "Write operation should fail in read-only mode");
    }
}
