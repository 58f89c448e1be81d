//! YAML-file storage backend.
//!
//! File layout:
//!
//! ```text
//! data/
//! ├── targets.yaml               ← earning targets
//! └── notification_ledger.yaml   ← fired-notification ledger
//! ```

pub mod connection;
pub mod ledger_repository;
pub mod targets_repository;
