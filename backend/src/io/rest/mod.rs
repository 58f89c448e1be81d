pub mod export_apis;
pub mod notification_apis;
pub mod record_apis;
pub mod target_apis;
