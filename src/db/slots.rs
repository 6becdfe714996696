//! Slot-level reads and writes.
//!
//! Generic over the executor so the record store can run them inside a transaction.

use chrono::Utc;
use sqlx::{Executor, Row, Sqlite};

/// Read the raw value stored under `slot`, if any.
pub async fn read_slot<'e, E>(executor: E, slot: &str) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query("SELECT value FROM kv_slots WHERE slot = ?")
        .bind(slot)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(|row| row.get("value")))
}

/// Replace the value stored under `slot`.
pub async fn write_slot<'e, E>(executor: E, slot: &str, value: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now().to_rfc3339();
    sqlx::query(
        "INSERT INTO kv_slots (slot, value, updated_at) VALUES (?, ?, ?) \
         ON CONFLICT(slot) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(slot)
    .bind(value)
    .bind(&now)
    .execute(executor)
    .await?;

    Ok(())
}

/// Remove `slot`. Returns whether anything was stored there.
pub async fn delete_slot<'e, E>(executor: E, slot: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM kv_slots WHERE slot = ?")
        .bind(slot)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_slot_write_read_delete() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("kv.sqlite"))
            .await
            .unwrap();

        assert_eq!(read_slot(&pool, "a").await.unwrap(), None);

        write_slot(&pool, "a", "[1]").await.unwrap();
        write_slot(&pool, "a", "[1,2]").await.unwrap();
        write_slot(&pool, "b", "[]").await.unwrap();

        assert_eq!(read_slot(&pool, "a").await.unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(read_slot(&pool, "b").await.unwrap().as_deref(), Some("[]"));

        assert!(delete_slot(&pool, "a").await.unwrap());
        assert!(!delete_slot(&pool, "a").await.unwrap());
        assert_eq!(read_slot(&pool, "a").await.unwrap(), None);
        assert!(read_slot(&pool, "b").await.unwrap().is_some());
    }
}
