//! Fired-notification ledger.
//!
//! The ledger is the single gate deciding whether a rule that currently
//! evaluates true actually produces a notification. Identities already
//! present in the ledger never fire again: permanently for one-shot
//! achievement identities, and for the rest of the day for per-day
//! alert identities (whose keys embed the calendar day).
//!
//! The in-memory map is authoritative for the session. Reads at startup
//! degrade to an empty ledger when the file is missing or unreadable;
//! writes happen on a spawned task and failures are logged, never
//! surfaced.

use chrono::{NaiveDate, Utc};
use log::{error, info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::models::notification::NotificationIdentity;
use crate::storage::{LedgerEntry, LedgerRepository, LedgerStorage};

/// Per-day ledger entries older than this many days are dropped at load
const STALE_ENTRY_RETENTION_DAYS: i64 = 45;

/// Result of recording an identity in the ledger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordOutcome {
    /// True if the identity had not fired before and was inserted
    pub was_new: bool,
}

/// Service tracking which notification identities have fired
#[derive(Clone)]
pub struct NotificationLedger {
    entries: Arc<Mutex<HashMap<String, LedgerEntry>>>,
    repository: LedgerRepository,
}

impl NotificationLedger {
    /// Load the ledger from storage, degrading to empty on any read
    /// failure so a corrupt file never blocks startup.
    pub async fn load(repository: LedgerRepository) -> Self {
        let entries = match repository.load_entries().await {
            Ok(mut entries) => {
                let before = entries.len();
                prune_stale_entries(&mut entries, Utc::now().date_naive());
                if entries.len() < before {
                    info!(
                        "Pruned {} stale ledger entries ({} remain)",
                        before - entries.len(),
                        entries.len()
                    );
                }
                entries
            }
            Err(e) => {
                warn!("Failed to load notification ledger, starting empty: {}", e);
                HashMap::new()
            }
        };

        Self {
            entries: Arc::new(Mutex::new(entries)),
            repository,
        }
    }

    /// Atomically check-then-insert an identity.
    ///
    /// Returns `was_new: true` exactly once per identity; concurrent
    /// callers racing on the same identity see one winner.
    pub fn record(&self, identity: &NotificationIdentity) -> RecordOutcome {
        let key = identity.storage_key();
        let snapshot = {
            let mut entries = self.entries.lock().unwrap();
            if entries.contains_key(&key) {
                return RecordOutcome { was_new: false };
            }
            entries.insert(
                key.clone(),
                LedgerEntry {
                    fired_at: Utc::now().to_rfc3339(),
                    acknowledged: false,
                },
            );
            entries.clone()
        };

        info!("Ledger recorded new identity: {}", key);
        self.persist(snapshot);
        RecordOutcome { was_new: true }
    }

    /// Mark an identity as acknowledged. The entry is retained so
    /// one-shot identities can never fire a second time.
    pub fn acknowledge(&self, identity: &NotificationIdentity) -> bool {
        let key = identity.storage_key();
        let snapshot = {
            let mut entries = self.entries.lock().unwrap();
            match entries.get_mut(&key) {
                Some(entry) => entry.acknowledged = true,
                None => return false,
            }
            entries.clone()
        };

        self.persist(snapshot);
        true
    }

    /// Mark every entry acknowledged (bulk clear)
    pub fn acknowledge_all(&self) {
        let snapshot = {
            let mut entries = self.entries.lock().unwrap();
            for entry in entries.values_mut() {
                entry.acknowledged = true;
            }
            entries.clone()
        };

        self.persist(snapshot);
    }

    pub fn is_acknowledged(&self, identity: &NotificationIdentity) -> bool {
        let entries = self.entries.lock().unwrap();
        entries
            .get(&identity.storage_key())
            .map(|entry| entry.acknowledged)
            .unwrap_or(false)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Persist a snapshot of the map without blocking the caller.
    /// The in-memory state stays authoritative if the write fails.
    fn persist(&self, snapshot: HashMap<String, LedgerEntry>) {
        let repository = self.repository.clone();
        tokio::spawn(async move {
            if let Err(e) = repository.save_entries(&snapshot).await {
                error!("Failed to persist notification ledger: {}", e);
            }
        });
    }
}

/// Drop per-day entries (keys carrying a "::YYYY-MM-DD" suffix) older
/// than the retention window. One-shot entries are never pruned.
fn prune_stale_entries(entries: &mut HashMap<String, LedgerEntry>, today: NaiveDate) {
    entries.retain(|key, _| match key.split_once("::") {
        Some((_, date_part)) => match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            Ok(date) => (today - date).num_days() <= STALE_ENTRY_RETENTION_DAYS,
            Err(_) => true,
        },
        None => true,
    });
}
