//! # Notification Ledger Repository
//!
//! Stores which notifications have already fired in a single YAML file
//! `notification_ledger.yaml` at the root of the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! high_earner:
//!   fired_at: "2025-01-14T19:30:00Z"
//!   acknowledged: false
//! missing_shift::2025-01-13:
//!   fired_at: "2025-01-14T12:00:00Z"
//!   acknowledged: true
//! ```
//!
//! The whole map is read into memory at startup and rewritten on each
//! mutation. Atomic writes go through a temp file and rename.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::connection::YamlConnection;

/// A single fired-notification entry in the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// When the notification fired (RFC 3339)
    pub fired_at: String,
    /// Whether the user has acknowledged it
    pub acknowledged: bool,
}

/// Storage trait for ledger operations
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Load all ledger entries keyed by identity string
    async fn load_entries(&self) -> Result<HashMap<String, LedgerEntry>>;

    /// Persist the full set of ledger entries, replacing the file
    async fn save_entries(&self, entries: &HashMap<String, LedgerEntry>) -> Result<()>;
}

/// YAML-file ledger repository
#[derive(Clone)]
pub struct LedgerRepository {
    connection: YamlConnection,
}

impl LedgerRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self { connection }
    }

    fn ledger_path(&self) -> PathBuf {
        self.connection.base_directory().join("notification_ledger.yaml")
    }
}

#[async_trait]
impl LedgerStorage for LedgerRepository {
    async fn load_entries(&self) -> Result<HashMap<String, LedgerEntry>> {
        let path = self.ledger_path();

        if !path.exists() {
            debug!("No ledger file at {:?}, starting empty", path);
            return Ok(HashMap::new());
        }

        let yaml_content = fs::read_to_string(&path)?;
        let entries: HashMap<String, LedgerEntry> = serde_yaml::from_str(&yaml_content)?;
        debug!("Loaded {} ledger entries from {:?}", entries.len(), path);
        Ok(entries)
    }

    async fn save_entries(&self, entries: &HashMap<String, LedgerEntry>) -> Result<()> {
        let path = self.ledger_path();
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)?;
        }

        let yaml_content = serde_yaml::to_string(entries)?;

        // Atomic write: temp file, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved {} ledger entries to {:?}", entries.len(), path);
        Ok(())
    }
}
