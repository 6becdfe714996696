//! Submission lifecycle: validate, mint identifiers, stamp, persist.

mod confirmation;

pub use confirmation::*;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::errors::SubmitError;
use crate::models::{DonationRecord, PledgeDraft};
use crate::receipt::{IdentifierSource, RandomIdentifiers};
use crate::store::RecordStore;
use crate::validation;

/// Default simulated processing delay.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1000);

/// Default number of tries at minting a non-colliding id/receipt pair.
pub const DEFAULT_MAX_MINT_ATTEMPTS: u32 = 5;

/// Turns pledge drafts into persisted donation records.
#[derive(Clone)]
pub struct Coordinator {
    store: RecordStore,
    identifiers: Arc<dyn IdentifierSource>,
    latency: Duration,
    max_attempts: u32,
}

impl Coordinator {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            identifiers: Arc::new(RandomIdentifiers),
            latency: DEFAULT_SUBMIT_DELAY,
            max_attempts: DEFAULT_MAX_MINT_ATTEMPTS,
        }
    }

    pub fn from_config(store: RecordStore, config: &Config) -> Self {
        Self::new(store)
            .with_latency(config.submit_delay)
            .with_max_attempts(config.max_mint_attempts)
    }

    /// Simulated processing delay applied after validation. Zero disables it.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_identifiers(mut self, identifiers: impl IdentifierSource + 'static) -> Self {
        self.identifiers = Arc::new(identifiers);
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Accept `draft` and return the stored record.
    ///
    /// Validation failures return every field error and leave storage untouched. Storage failures
    /// are returned as-is; nothing is retried.
    pub async fn submit(&self, draft: &PledgeDraft) -> Result<DonationRecord, SubmitError> {
        if let Err(errors) = validation::validate(draft) {
            tracing::debug!(fields = errors.len(), "Pledge rejected by validation");
            return Err(errors.into());
        }

        self.simulate_latency().await;

        let existing = self.store.snapshot().await?;
        let date = Utc::now();
        let (id, receipt_number) = self.mint(&existing, date)?;

        let record = DonationRecord {
            id,
            amount: draft.amount,
            name: draft.name.clone(),
            email: draft.email.clone(),
            frequency: draft.frequency,
            date,
            receipt_number,
        };

        if let Err(e) = self.store.append(&record).await {
            tracing::error!(receipt = %record.receipt_number, "Failed to persist donation: {}", e);
            return Err(e.into());
        }

        tracing::info!(
            id = %record.id,
            receipt = %record.receipt_number,
            amount = record.amount,
            frequency = %record.frequency,
            "Donation accepted"
        );
        Ok(record)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn mint(
        &self,
        existing: &[DonationRecord],
        now: DateTime<Utc>,
    ) -> Result<(String, String), SubmitError> {
        let taken_ids: HashSet<&str> = existing.iter().map(|r| r.id.as_str()).collect();
        let taken_receipts: HashSet<&str> =
            existing.iter().map(|r| r.receipt_number.as_str()).collect();

        for attempt in 1..=self.max_attempts {
            let id = self.identifiers.record_id();
            let receipt = self.identifiers.receipt_number(now);
            if !taken_ids.contains(id.as_str()) && !taken_receipts.contains(receipt.as_str()) {
                return Ok((id, receipt));
            }
            tracing::debug!(attempt, "Identifier collision, minting again");
        }

        tracing::error!(
            attempts = self.max_attempts,
            "Could not mint a unique donation identifier"
        );
        Err(SubmitError::IdentifierExhausted {
            attempts: self.max_attempts,
        })
    }
}
