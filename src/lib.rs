//! Books For Ghana donation core
//!
//! Validates pledges, issues receipt numbers, keeps accepted donations in local SQLite-backed
//! storage and derives the recent donations view shown on the home page.

pub mod config;
pub mod db;
pub mod errors;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod receipt;
pub mod store;
pub mod summary;
pub mod validation;

use chrono::{DateTime, Utc};

pub use config::Config;
pub use errors::{Field, FieldError, FieldErrors, StoreError, SubmitError};
pub use lifecycle::{Confirmation, Coordinator};
pub use models::{DonationRecord, Frequency, PledgeDraft};
pub use store::{ReadPolicy, RecordStore};
pub use summary::{recent, relative_age, SummaryView};
pub use validation::validate;

/// Everything a host page needs: submission, listing and the summary card.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Coordinator,
    pub config: Config,
}

impl AppState {
    /// Open storage named by `config` and wire the coordinator.
    pub async fn open(config: Config) -> Result<Self, StoreError> {
        let store = RecordStore::open(&config).await?;
        let coordinator = Coordinator::from_config(store, &config);
        Ok(Self {
            coordinator,
            config,
        })
    }

    pub fn store(&self) -> &RecordStore {
        self.coordinator.store()
    }

    pub async fn submit(&self, draft: &PledgeDraft) -> Result<DonationRecord, SubmitError> {
        self.coordinator.submit(draft).await
    }

    pub async fn list(&self) -> Vec<DonationRecord> {
        self.store().list().await
    }

    /// The recent donations card as of `now`.
    pub async fn summary(&self, now: DateTime<Utc>) -> SummaryView {
        let saved = self.list().await;
        if self.config.showcase_samples {
            let shown = summary::showcase_or_saved(&saved);
            SummaryView::build(&shown, self.config.recent_limit, now)
        } else {
            SummaryView::build(&saved, self.config.recent_limit, now)
        }
    }

    /// Maintenance only: drop every saved donation.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store().clear().await
    }

    pub async fn close(&self) {
        self.store().close().await;
    }
}
