//! # Domain Module
//!
//! Business logic for the tip tracker backend.
//!
//! ## Module Organization
//!
//! - **models**: Notification identities, rule kinds, record validation
//! - **rules**: Pure rule predicates and stats aggregation
//! - **record_service**: In-memory snapshot of income records
//! - **ledger_service**: Fired-notification ledger (dedup + persistence)
//! - **notification_service**: Check orchestration and dispatch queue
//! - **target_service**: Earning target configuration
//! - **export_service**: CSV export of the record snapshot
//!
//! ## Key Responsibilities
//!
//! - Evaluate achievement and alert rules over the record snapshot
//! - Fire each notification identity at most once (one-shot rules
//!   forever, per-day rules once per calendar day)
//! - Surface one current notification at a time with a FIFO queue
//!   behind it
//!
//! All services are explicit objects constructed once at application
//! start and cloned into whatever layer needs them; there is no global
//! mutable state.

pub mod export_service;
pub mod ledger_service;
pub mod models;
pub mod notification_service;
pub mod record_service;
pub mod rules;
pub mod target_service;

pub use export_service::ExportService;
pub use ledger_service::NotificationLedger;
pub use notification_service::NotificationService;
pub use record_service::RecordService;
pub use target_service::TargetService;
