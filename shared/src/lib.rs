use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day of shift income as reported by the record store.
///
/// Records are keyed by calendar day: storing a record for a date that
/// already has one replaces the existing record wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    /// Calendar day this record belongs to (unique per day)
    pub date: NaiveDate,
    /// Hours worked that day
    pub hours_worked: f64,
    /// Gross sales rung up that day
    pub sales_amount: f64,
    /// Tips received that day
    pub tips_amount: f64,
    /// Total revenue for the day (wages + tips + other)
    pub total_revenue: f64,
}

/// User-configured earning targets.
///
/// A zero value means "no target set" — rules that depend on a target
/// simply never trigger while it is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Daily tip goal in dollars
    pub daily_tip_amount: f64,
    /// Tip goal as a percentage of sales (0–100)
    pub tip_percentage_point: f64,
    /// Daily revenue-per-hour goal in dollars
    pub daily_revenue_per_hour: f64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            daily_tip_amount: 0.0,
            tip_percentage_point: 0.0,
            daily_revenue_per_hour: 0.0,
        }
    }
}

/// A notification surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification ID (UUID v4)
    pub id: String,
    /// Stable tag of the rule that fired, e.g. "tip_master"
    pub kind: String,
    /// Calendar day the notification is scoped to, for per-day alerts
    pub period: Option<NaiveDate>,
    /// Short display title
    pub title: String,
    /// Human-readable body text
    pub message: String,
    /// Icon hint for rendering
    pub icon: String,
    /// When the notification fired (RFC 3339)
    pub fired_at: String,
    /// Whether the user has acknowledged this notification
    pub acknowledged: bool,
}

/// Request to store (or replace) a day's income record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertRecordRequest {
    pub record: IncomeRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertRecordResponse {
    pub record: IncomeRecord,
    /// True if an existing record for the same date was replaced
    pub replaced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordListResponse {
    /// Records in chronological order (oldest first)
    pub records: Vec<IncomeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTargetsRequest {
    pub targets: TargetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetsResponse {
    pub targets: TargetConfig,
}

/// Result of running the notification checks once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckNotificationsResponse {
    /// Notifications that fired for the first time during this check
    pub fired: Vec<Notification>,
}

/// Snapshot of the notification queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationQueueResponse {
    /// The notification currently being shown, if any
    pub current: Option<Notification>,
    /// Remaining notifications in arrival order
    pub pending: Vec<Notification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcknowledgeNotificationRequest {
    /// ID of the notification to acknowledge
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    /// Complete CSV file content
    pub csv_content: String,
    /// Suggested filename for the download
    pub filename: String,
    /// Number of records exported
    pub record_count: usize,
}
