//! Host key-value storage backed by SQLite.
//!
//! Each slot holds one textual value; the donation collection lives in a single slot.

mod slots;

pub use slots::*;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::time::Duration;

/// Open the slot database at `db_path` and make sure the `kv_slots` table exists.
///
/// The file and its parent directories are created on first use. The pool holds a single
/// connection, so a slot's read-modify-write never interleaves with another write in-process.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = db_path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            tracing::warn!("Could not create {}: {}", parent.display(), e);
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(slot_file_options(db_path))
        .await?;
    create_slot_table(&pool).await?;

    tracing::debug!("Slot storage ready at {}", db_path.display());
    Ok(pool)
}

fn slot_file_options(db_path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
}

/// One row per slot; `value` is the slot's whole text.
async fn create_slot_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS kv_slots (
            slot TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("dir").join("kv.sqlite");

        let pool = init_database(&db_path).await.unwrap();
        assert!(db_path.exists());

        // Table creation is idempotent
        create_slot_table(&pool).await.unwrap();
        pool.close().await;
    }

    #[tokio::test]
    async fn test_reopen_keeps_slot_values() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("kv.sqlite");

        let pool = init_database(&db_path).await.unwrap();
        write_slot(&pool, "donations", "[]").await.unwrap();
        pool.close().await;

        let pool = init_database(&db_path).await.unwrap();
        assert_eq!(
            read_slot(&pool, "donations").await.unwrap().as_deref(),
            Some("[]")
        );
        pool.close().await;
    }
}
