use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// The kind of rule behind a notification, with its tuning parameters.
///
/// Display metadata (title, description, icon, color) is a pure lookup
/// on the variant so the presentation layer never needs its own table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleKind {
    /// Tip average reached the given percentage of sales
    TipPercentage { threshold: f64 },
    /// Data entered for `days` consecutive days
    ConsistencyStreak { days: u32 },
    /// Tips exceeded the configured tip target by the given ratio
    TargetExceeded { ratio: f64 },
    /// Average revenue per hour reached the given rate
    HourlyRate { rate: f64 },
    /// Tips met the configured tip target for the day
    TipTargetReached,
    /// Yesterday has no shift data
    MissingShift,
}

impl RuleKind {
    /// Stable tag used in ledger keys and API payloads
    pub fn tag(&self) -> &'static str {
        match self {
            RuleKind::TipPercentage { .. } => "tip_master",
            RuleKind::ConsistencyStreak { .. } => "consistency_king",
            RuleKind::TargetExceeded { .. } => "tip_target_crusher",
            RuleKind::HourlyRate { .. } => "high_earner",
            RuleKind::TipTargetReached => "target_achieved",
            RuleKind::MissingShift => "missing_shift",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RuleKind::TipPercentage { .. } => "Tip Master",
            RuleKind::ConsistencyStreak { .. } => "Consistency King",
            RuleKind::TargetExceeded { .. } => "Target Crusher",
            RuleKind::HourlyRate { .. } => "High Earner",
            RuleKind::TipTargetReached => "Target Reached!",
            RuleKind::MissingShift => "Complete Yesterday's Shift",
        }
    }

    pub fn description(&self) -> String {
        match self {
            RuleKind::TipPercentage { threshold } => {
                format!("Achieve {:.0}%+ tip average", threshold)
            }
            RuleKind::ConsistencyStreak { days } => {
                format!("Enter data for {} consecutive days", days)
            }
            RuleKind::TargetExceeded { ratio } => {
                format!("Exceed tip target by {:.0}%", (ratio - 1.0) * 100.0)
            }
            RuleKind::HourlyRate { rate } => format!("Earn ${:.0}+/hour average", rate),
            RuleKind::TipTargetReached => "Reach your tip target for the day".to_string(),
            RuleKind::MissingShift => "Add earnings data to track your progress".to_string(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            RuleKind::TipPercentage { .. } => "star.fill",
            RuleKind::ConsistencyStreak { .. } => "crown.fill",
            RuleKind::TargetExceeded { .. } => "target",
            RuleKind::HourlyRate { .. } => "dollarsign.circle.fill",
            RuleKind::TipTargetReached => "checkmark.seal.fill",
            RuleKind::MissingShift => "calendar.badge.exclamationmark",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RuleKind::TipPercentage { .. } => "yellow",
            RuleKind::ConsistencyStreak { .. } => "purple",
            RuleKind::TargetExceeded { .. } => "orange",
            RuleKind::HourlyRate { .. } => "green",
            RuleKind::TipTargetReached => "blue",
            RuleKind::MissingShift => "red",
        }
    }
}

/// Whether a rule fires once ever or once per calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FiringPolicy {
    /// Fires at most once per identity, permanently (achievements)
    OneShot,
    /// Fires at most once per calendar day and again on later days
    PerDay,
}

/// The deduplication key for a notification.
///
/// One-shot rules are identified by their kind tag alone; per-day rules
/// additionally carry the calendar day they fired for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotificationIdentity {
    pub kind: RuleKind,
    pub period: Option<NaiveDate>,
}

impl NotificationIdentity {
    pub fn one_shot(kind: RuleKind) -> Self {
        Self { kind, period: None }
    }

    pub fn for_day(kind: RuleKind, day: NaiveDate) -> Self {
        Self {
            kind,
            period: Some(day),
        }
    }

    /// Ledger key in the form "high_earner" or "missing_shift::2025-01-13"
    pub fn storage_key(&self) -> String {
        match self.period {
            Some(day) => format!("{}::{}", self.kind.tag(), day.format("%Y-%m-%d")),
            None => self.kind.tag().to_string(),
        }
    }
}

/// A notification held by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub identity: NotificationIdentity,
    pub title: String,
    pub message: String,
    pub fired_at: DateTime<Utc>,
    pub acknowledged: bool,
}

impl Notification {
    pub fn new(identity: NotificationIdentity, message: String, fired_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            identity,
            title: identity.kind.title().to_string(),
            message,
            fired_at,
            acknowledged: false,
        }
    }

    /// Convert to the DTO shape shared with the presentation layer
    pub fn to_dto(&self) -> shared::Notification {
        shared::Notification {
            id: self.id.clone(),
            kind: self.identity.kind.tag().to_string(),
            period: self.identity.period,
            title: self.title.clone(),
            message: self.message.clone(),
            icon: self.identity.kind.icon().to_string(),
            fired_at: self.fired_at.to_rfc3339(),
            acknowledged: self.acknowledged,
        }
    }
}
