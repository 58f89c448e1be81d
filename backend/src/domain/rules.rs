//! Rule evaluation for achievements and alerts.
//!
//! Everything in this module is pure computation over an in-memory
//! snapshot of income records plus the user's targets: aggregation,
//! streak counting, and the per-rule predicates. Nothing here touches
//! storage or the notification queue.
//!
//! Predicates are total: division-by-zero and unset-target conditions
//! evaluate to "not met", never to an error.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

use shared::{IncomeRecord, TargetConfig};

use crate::domain::models::notification::{FiringPolicy, RuleKind};

/// Aggregated totals over a set of income records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodStats {
    pub hours: f64,
    pub sales: f64,
    pub tips: f64,
    pub total_revenue: f64,
}

impl PeriodStats {
    pub fn from_records(records: &[IncomeRecord]) -> Self {
        let mut stats = PeriodStats::default();
        for record in records {
            stats.hours += record.hours_worked;
            stats.sales += record.sales_amount;
            stats.tips += record.tips_amount;
            stats.total_revenue += record.total_revenue;
        }
        stats
    }

    /// Tips as a percentage of sales; None when there are no sales
    pub fn tip_percentage(&self) -> Option<f64> {
        if self.sales > 0.0 {
            Some(self.tips / self.sales * 100.0)
        } else {
            None
        }
    }

    /// Revenue per hour worked; None when no hours were logged
    pub fn hourly_rate(&self) -> Option<f64> {
        if self.hours > 0.0 {
            Some(self.total_revenue / self.hours)
        } else {
            None
        }
    }

    /// The tip amount implied by a percentage-of-sales target.
    /// None when the target is unset or there are no sales.
    pub fn tip_target_amount(&self, targets: &TargetConfig) -> Option<f64> {
        if targets.tip_percentage_point > 0.0 && self.sales > 0.0 {
            Some(self.sales * (targets.tip_percentage_point / 100.0))
        } else {
            None
        }
    }
}

/// Count consecutive days with at least one record, scanning backward
/// from yesterday. Today is excluded; any gap day stops the scan.
pub fn entry_streak_length(records: &[IncomeRecord], today: NaiveDate) -> u32 {
    let recorded_days: HashSet<NaiveDate> = records.iter().map(|r| r.date).collect();

    let mut streak = 0;
    loop {
        let check_date = today - Duration::days(i64::from(streak) + 1);
        if recorded_days.contains(&check_date) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Everything a rule predicate may look at during one evaluation pass.
pub struct EvalContext<'a> {
    pub records: &'a [IncomeRecord],
    pub targets: &'a TargetConfig,
    pub today: NaiveDate,
    pub stats: PeriodStats,
}

impl<'a> EvalContext<'a> {
    pub fn new(records: &'a [IncomeRecord], targets: &'a TargetConfig, today: NaiveDate) -> Self {
        Self {
            records,
            targets,
            today,
            stats: PeriodStats::from_records(records),
        }
    }
}

impl RuleKind {
    /// Whether this rule's condition currently holds.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<bool> {
        let met = match self {
            RuleKind::TipPercentage { threshold } => ctx
                .stats
                .tip_percentage()
                .map(|pct| pct >= *threshold)
                .unwrap_or(false),
            RuleKind::ConsistencyStreak { days } => {
                entry_streak_length(ctx.records, ctx.today) >= *days
            }
            RuleKind::TargetExceeded { ratio } => ctx
                .stats
                .tip_target_amount(ctx.targets)
                .map(|target| ctx.stats.tips >= target * ratio)
                .unwrap_or(false),
            RuleKind::HourlyRate { rate } => ctx
                .stats
                .hourly_rate()
                .map(|hourly| hourly >= *rate)
                .unwrap_or(false),
            RuleKind::TipTargetReached => ctx
                .stats
                .tip_target_amount(ctx.targets)
                .map(|target| ctx.stats.tips >= target)
                .unwrap_or(false),
            RuleKind::MissingShift => {
                let yesterday = ctx.today - Duration::days(1);
                !ctx.records.iter().any(|r| r.date == yesterday)
            }
        };
        Ok(met)
    }

    /// Body text for the notification this rule produces.
    pub fn message(&self, ctx: &EvalContext<'_>) -> String {
        match self {
            RuleKind::TipPercentage { threshold } => {
                format!("Achieved {:.0}%+ tip average!", threshold)
            }
            RuleKind::ConsistencyStreak { days } => format!("{}-day entry streak achieved!", days),
            RuleKind::TargetExceeded { ratio } => {
                format!("Exceeded tip target by {:.0}%!", (ratio - 1.0) * 100.0)
            }
            RuleKind::HourlyRate { rate } => format!("Achieved ${:.0}+/hour average!", rate),
            RuleKind::TipTargetReached => {
                let target = ctx.stats.tip_target_amount(ctx.targets).unwrap_or(0.0);
                format!("Congratulations on reaching your goal! ${:.2}", target)
            }
            RuleKind::MissingShift => "Add earnings data to track your progress".to_string(),
        }
    }
}

/// A rule together with its firing policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleDefinition {
    pub kind: RuleKind,
    pub firing: FiringPolicy,
}

/// The built-in rule set.
///
/// Achievements are one-shot; alerts fire once per day.
pub fn builtin_rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition {
            kind: RuleKind::TipPercentage { threshold: 20.0 },
            firing: FiringPolicy::OneShot,
        },
        RuleDefinition {
            kind: RuleKind::ConsistencyStreak { days: 7 },
            firing: FiringPolicy::OneShot,
        },
        RuleDefinition {
            kind: RuleKind::TargetExceeded { ratio: 1.5 },
            firing: FiringPolicy::OneShot,
        },
        RuleDefinition {
            kind: RuleKind::HourlyRate { rate: 30.0 },
            firing: FiringPolicy::OneShot,
        },
        RuleDefinition {
            kind: RuleKind::TipTargetReached,
            firing: FiringPolicy::PerDay,
        },
        RuleDefinition {
            kind: RuleKind::MissingShift,
            firing: FiringPolicy::PerDay,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(date: NaiveDate, hours: f64, sales: f64, tips: f64, revenue: f64) -> IncomeRecord {
        IncomeRecord {
            date,
            hours_worked: hours,
            sales_amount: sales,
            tips_amount: tips,
            total_revenue: revenue,
        }
    }

    fn no_targets() -> TargetConfig {
        TargetConfig::default()
    }

    fn tip_targets(pct: f64) -> TargetConfig {
        TargetConfig {
            tip_percentage_point: pct,
            ..TargetConfig::default()
        }
    }

    #[test]
    fn test_tip_percentage_met() {
        let records = vec![record(day("2025-01-01"), 8.0, 100.0, 25.0, 150.0)];
        let targets = no_targets();
        let ctx = EvalContext::new(&records, &targets, day("2025-01-02"));

        // 25/100 × 100 = 25% ≥ 20%
        let rule = RuleKind::TipPercentage { threshold: 20.0 };
        assert!(rule.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_tip_percentage_not_met() {
        let records = vec![record(day("2025-01-01"), 8.0, 100.0, 25.0, 150.0)];
        let targets = no_targets();
        let ctx = EvalContext::new(&records, &targets, day("2025-01-02"));

        let rule = RuleKind::TipPercentage { threshold: 30.0 };
        assert!(!rule.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_tip_percentage_zero_sales_is_false() {
        // Tips with no sales must evaluate false, not divide by zero
        let records = vec![record(day("2025-01-01"), 8.0, 0.0, 50.0, 150.0)];
        let targets = no_targets();
        let ctx = EvalContext::new(&records, &targets, day("2025-01-02"));

        let rule = RuleKind::TipPercentage { threshold: 20.0 };
        assert!(!rule.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_entry_streak_full_week() {
        let today = day("2025-01-15");
        let records: Vec<IncomeRecord> = (1..=7)
            .map(|offset| record(today - Duration::days(offset), 8.0, 100.0, 20.0, 120.0))
            .collect();

        assert_eq!(entry_streak_length(&records, today), 7);

        let targets = no_targets();
        let ctx = EvalContext::new(&records, &targets, today);
        let rule = RuleKind::ConsistencyStreak { days: 7 };
        assert!(rule.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_entry_streak_gap_stops_scan() {
        let today = day("2025-01-15");
        // Days 1..=7 back, except day 4 is missing
        let records: Vec<IncomeRecord> = (1..=7)
            .filter(|offset| *offset != 4)
            .map(|offset| record(today - Duration::days(offset), 8.0, 100.0, 20.0, 120.0))
            .collect();

        // The gap at today-4 stops the scan at 3 even though older days exist
        assert_eq!(entry_streak_length(&records, today), 3);

        let targets = no_targets();
        let ctx = EvalContext::new(&records, &targets, today);
        let rule = RuleKind::ConsistencyStreak { days: 7 };
        assert!(!rule.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_entry_streak_excludes_today() {
        let today = day("2025-01-15");
        let records = vec![record(today, 8.0, 100.0, 20.0, 120.0)];

        assert_eq!(entry_streak_length(&records, today), 0);
    }

    #[test]
    fn test_target_exceeded_by_ratio() {
        // Target: 500 × 20% = 100; 1.5× target = 150
        let records = vec![record(day("2025-01-01"), 8.0, 500.0, 150.0, 300.0)];
        let targets = tip_targets(20.0);
        let ctx = EvalContext::new(&records, &targets, day("2025-01-02"));

        let rule = RuleKind::TargetExceeded { ratio: 1.5 };
        assert!(rule.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_target_exceeded_below_ratio() {
        let records = vec![record(day("2025-01-01"), 8.0, 500.0, 149.0, 300.0)];
        let targets = tip_targets(20.0);
        let ctx = EvalContext::new(&records, &targets, day("2025-01-02"));

        let rule = RuleKind::TargetExceeded { ratio: 1.5 };
        assert!(!rule.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_unset_target_never_triggers() {
        // Huge tips but no configured target
        let records = vec![record(day("2025-01-01"), 8.0, 500.0, 400.0, 700.0)];
        let targets = no_targets();
        let ctx = EvalContext::new(&records, &targets, day("2025-01-02"));

        assert!(!RuleKind::TargetExceeded { ratio: 1.5 }.evaluate(&ctx).unwrap());
        assert!(!RuleKind::TipTargetReached.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_hourly_rate_met() {
        let records = vec![record(day("2025-01-01"), 10.0, 500.0, 100.0, 320.0)];
        let targets = no_targets();
        let ctx = EvalContext::new(&records, &targets, day("2025-01-02"));

        let rule = RuleKind::HourlyRate { rate: 30.0 };
        assert!(rule.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_hourly_rate_zero_hours_is_false() {
        // Revenue with zero hours must evaluate false, not divide by zero
        let records = vec![record(day("2025-01-01"), 0.0, 500.0, 100.0, 9999.0)];
        let targets = no_targets();
        let ctx = EvalContext::new(&records, &targets, day("2025-01-02"));

        let rule = RuleKind::HourlyRate { rate: 30.0 };
        assert!(!rule.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_tip_target_reached() {
        // Target: 500 × 20% = 100
        let records = vec![record(day("2025-01-01"), 8.0, 500.0, 100.0, 300.0)];
        let targets = tip_targets(20.0);
        let ctx = EvalContext::new(&records, &targets, day("2025-01-02"));

        assert!(RuleKind::TipTargetReached.evaluate(&ctx).unwrap());
        assert_eq!(
            RuleKind::TipTargetReached.message(&ctx),
            "Congratulations on reaching your goal! $100.00"
        );
    }

    #[test]
    fn test_missing_shift_yesterday_empty() {
        let today = day("2025-01-15");
        let records = vec![record(day("2025-01-13"), 8.0, 100.0, 20.0, 120.0)];
        let targets = no_targets();
        let ctx = EvalContext::new(&records, &targets, today);

        assert!(RuleKind::MissingShift.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_missing_shift_yesterday_present() {
        let today = day("2025-01-15");
        let records = vec![record(day("2025-01-14"), 8.0, 100.0, 20.0, 120.0)];
        let targets = no_targets();
        let ctx = EvalContext::new(&records, &targets, today);

        assert!(!RuleKind::MissingShift.evaluate(&ctx).unwrap());
    }

    #[test]
    fn test_stats_aggregate_multiple_records() {
        let records = vec![
            record(day("2025-01-01"), 8.0, 400.0, 80.0, 200.0),
            record(day("2025-01-02"), 6.0, 200.0, 40.0, 130.0),
        ];
        let stats = PeriodStats::from_records(&records);

        assert_eq!(stats.hours, 14.0);
        assert_eq!(stats.sales, 600.0);
        assert_eq!(stats.tips, 120.0);
        assert_eq!(stats.total_revenue, 330.0);
        assert_eq!(stats.tip_percentage(), Some(20.0));
    }

    #[test]
    fn test_builtin_rules_cover_all_kinds() {
        let rules = builtin_rules();
        assert_eq!(rules.len(), 6);

        let one_shot = rules
            .iter()
            .filter(|r| r.firing == FiringPolicy::OneShot)
            .count();
        assert_eq!(one_shot, 4);
    }
}
