//! Record store for the donation collection.
//!
//! The whole collection is one JSON array kept under a single configurable slot. This store is the
//! only writer of that slot; everyone else receives snapshot copies.
//!
//! Reads are lenient: a missing, unreachable or unparseable slot reads as an empty collection. Use
//! [`RecordStore::try_list`] to tell those cases apart. Writes are strict and always report failure.
//!
//! There is no cross-process locking. Two processes appending to the same database file can race on
//! the read-modify-write and lose one of the records.

use std::str::FromStr;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::{self, delete_slot, read_slot, write_slot};
use crate::errors::StoreError;
use crate::models::DonationRecord;

/// How `append` treats an existing slot that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPolicy {
    /// Treat it as empty and overwrite it with the new collection
    #[default]
    Lenient,
    /// Refuse to append and leave the slot untouched
    Strict,
}

impl FromStr for ReadPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(ReadPolicy::Lenient),
            "strict" => Ok(ReadPolicy::Strict),
            _ => Err(()),
        }
    }
}

/// Durable storage of the donation collection.
#[derive(Clone)]
pub struct RecordStore {
    pool: SqlitePool,
    slot: String,
    policy: ReadPolicy,
}

impl RecordStore {
    /// Open the database named in `config` and bind to its storage slot.
    pub async fn open(config: &Config) -> Result<Self, StoreError> {
        let pool = db::init_database(&config.db_path).await?;
        tracing::info!(
            slot = %config.storage_slot,
            "Opened donation store at {:?}",
            config.db_path
        );
        Ok(Self::with_pool(
            pool,
            config.storage_slot.clone(),
            config.read_policy,
        ))
    }

    /// Bind to `slot` on an already initialized pool.
    pub fn with_pool(pool: SqlitePool, slot: impl Into<String>, policy: ReadPolicy) -> Self {
        Self {
            pool,
            slot: slot.into(),
            policy,
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn policy(&self) -> ReadPolicy {
        self.policy
    }

    /// Release the storage connection. Later operations fail with `Unavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Full persisted collection in insertion order, or empty if it cannot be read.
    pub async fn list(&self) -> Vec<DonationRecord> {
        match self.try_list().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(slot = %self.slot, "Reading donations failed, using empty list: {}", e);
                Vec::new()
            }
        }
    }

    /// Full persisted collection, surfacing storage and parse failures.
    pub async fn try_list(&self) -> Result<Vec<DonationRecord>, StoreError> {
        let raw = read_slot(&self.pool, &self.slot).await?;
        parse_collection(raw.as_deref())
    }

    /// Collection as `append` would see it under the configured policy.
    pub(crate) async fn snapshot(&self) -> Result<Vec<DonationRecord>, StoreError> {
        let raw = read_slot(&self.pool, &self.slot).await?;
        self.apply_policy(parse_collection(raw.as_deref()))
    }

    /// Append `record` to the persisted collection in a single transaction.
    pub async fn append(&self, record: &DonationRecord) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let raw = read_slot(&mut *tx, &self.slot).await?;
        let mut records = self.apply_policy(parse_collection(raw.as_deref()))?;
        records.push(record.clone());

        let blob = serde_json::to_string(&records)?;
        write_slot(&mut *tx, &self.slot, &blob).await?;
        tx.commit().await?;

        tracing::debug!(
            slot = %self.slot,
            id = %record.id,
            total = records.len(),
            "Appended donation"
        );
        Ok(())
    }

    /// Delete the entire collection.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let existed = delete_slot(&self.pool, &self.slot).await?;
        tracing::info!(slot = %self.slot, existed, "Cleared donations");
        Ok(())
    }

    fn apply_policy(
        &self,
        parsed: Result<Vec<DonationRecord>, StoreError>,
    ) -> Result<Vec<DonationRecord>, StoreError> {
        match (parsed, self.policy) {
            (Err(StoreError::Corrupt(msg)), ReadPolicy::Lenient) => {
                tracing::warn!(slot = %self.slot, "Discarding unreadable donations: {}", msg);
                Ok(Vec::new())
            }
            (result, _) => result,
        }
    }
}

fn parse_collection(raw: Option<&str>) -> Result<Vec<DonationRecord>, StoreError> {
    match raw {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| StoreError::Corrupt(format!("Unparseable donation collection: {}", e))),
    }
}
