//! In-memory snapshot of the income records supplied by the record
//! store.
//!
//! The remote store owns the data; this service only holds the
//! chronologically ordered snapshot the notification checks evaluate
//! against. Records are append/replace-by-date: storing a record for a
//! date that already has one replaces it wholesale.

use anyhow::Result;
use log::info;
use std::sync::{Arc, Mutex};

use shared::{IncomeRecord, RecordListResponse, UpsertRecordRequest, UpsertRecordResponse};

use crate::domain::models::record::validate_record;

/// Service holding the current record snapshot
#[derive(Clone)]
pub struct RecordService {
    records: Arc<Mutex<Vec<IncomeRecord>>>,
}

impl RecordService {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Store a day's record, replacing any existing record for the
    /// same date. Keeps the snapshot in chronological order.
    pub fn upsert_record(&self, request: UpsertRecordRequest) -> Result<UpsertRecordResponse> {
        let record = request.record;
        validate_record(&record)?;

        let mut records = self.records.lock().unwrap();
        let replaced = if let Some(existing) = records.iter_mut().find(|r| r.date == record.date) {
            *existing = record.clone();
            true
        } else {
            let position = records.partition_point(|r| r.date < record.date);
            records.insert(position, record.clone());
            false
        };

        info!(
            "Stored record for {} ({} total, replaced: {})",
            record.date,
            records.len(),
            replaced
        );

        Ok(UpsertRecordResponse { record, replaced })
    }

    /// List all records in chronological order
    pub fn list_records(&self) -> RecordListResponse {
        RecordListResponse {
            records: self.snapshot(),
        }
    }

    /// Clone the current snapshot for evaluation
    pub fn snapshot(&self) -> Vec<IncomeRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for RecordService {
    fn default() -> Self {
        Self::new()
    }
}
