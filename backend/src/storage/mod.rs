//! # Storage Module
//!
//! Persistence layer for the tip tracker backend.
//!
//! All durable state lives in small YAML files under a single base data
//! directory. Each file is read entirely into memory and rewritten
//! wholesale on mutation; there are no partial updates and no migration
//! machinery beyond "if unreadable, start empty".

pub mod yaml;

pub use yaml::connection::YamlConnection;
pub use yaml::ledger_repository::{LedgerEntry, LedgerRepository, LedgerStorage};
pub use yaml::targets_repository::{TargetsRepository, TargetsStorage};
