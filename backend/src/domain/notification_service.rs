//! Notification checks and dispatch.
//!
//! This service runs the rule set over the current record snapshot,
//! lets the ledger decide what is genuinely new, and queues the
//! resulting notifications for the presentation layer: one `current`
//! notification on display and a FIFO `pending` queue behind it.
//!
//! The ledger's `record` check is the sole dedup gate — anything it
//! reports as new goes straight into the queue.

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use log::{error, info, warn};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use shared::{CheckNotificationsResponse, NotificationQueueResponse, TargetConfig};

use crate::domain::ledger_service::NotificationLedger;
use crate::domain::models::notification::{FiringPolicy, Notification, NotificationIdentity};
use crate::domain::record_service::RecordService;
use crate::domain::rules::{builtin_rules, EvalContext};
use crate::domain::target_service::TargetService;

#[derive(Default)]
struct QueueState {
    current: Option<Notification>,
    pending: VecDeque<Notification>,
}

impl QueueState {
    /// Move the next pending notification into `current`, skipping any
    /// whose identity has been acknowledged in the meantime.
    fn promote_next(&mut self, ledger: &NotificationLedger) {
        while let Some(notification) = self.pending.pop_front() {
            if ledger.is_acknowledged(&notification.identity) {
                continue;
            }
            self.current = Some(notification);
            return;
        }
        self.current = None;
    }
}

/// Service running notification checks and holding the dispatch queue
#[derive(Clone)]
pub struct NotificationService {
    record_service: RecordService,
    target_service: TargetService,
    ledger: NotificationLedger,
    queue: Arc<Mutex<QueueState>>,
}

impl NotificationService {
    pub fn new(
        record_service: RecordService,
        target_service: TargetService,
        ledger: NotificationLedger,
    ) -> Self {
        Self {
            record_service,
            target_service,
            ledger,
            queue: Arc::new(Mutex::new(QueueState::default())),
        }
    }

    /// Run all checks against the current snapshot.
    pub async fn run_checks(&self) -> Result<CheckNotificationsResponse> {
        self.run_checks_for_day(Local::now().date_naive()).await
    }

    /// Run all checks with evaluation pinned to the given day.
    pub async fn run_checks_for_day(&self, today: NaiveDate) -> Result<CheckNotificationsResponse> {
        let records = self.record_service.snapshot();
        let targets = match self.target_service.get_targets().await {
            Ok(response) => response.targets,
            Err(e) => {
                warn!("Failed to load targets, checking with none set: {}", e);
                TargetConfig::default()
            }
        };

        let ctx = EvalContext::new(&records, &targets, today);
        let mut fired = Vec::new();

        for rule in builtin_rules() {
            let met = match rule.kind.evaluate(&ctx) {
                Ok(met) => met,
                Err(e) => {
                    // One broken rule must not stop the others
                    error!("Rule {} failed to evaluate: {}", rule.kind.tag(), e);
                    continue;
                }
            };
            if !met {
                continue;
            }

            let identity = match rule.firing {
                FiringPolicy::OneShot => NotificationIdentity::one_shot(rule.kind),
                FiringPolicy::PerDay => NotificationIdentity::for_day(rule.kind, today),
            };

            if !self.ledger.record(&identity).was_new {
                continue;
            }

            let notification = Notification::new(identity, rule.kind.message(&ctx), Utc::now());
            info!(
                "Notification fired: {} ({})",
                notification.title,
                identity.storage_key()
            );
            fired.push(notification.to_dto());
            self.enqueue(notification);
        }

        Ok(CheckNotificationsResponse { fired })
    }

    fn enqueue(&self, notification: Notification) {
        let mut queue = self.queue.lock().unwrap();
        if queue.current.is_none() {
            queue.current = Some(notification);
        } else {
            queue.pending.push_back(notification);
        }
    }

    /// Snapshot of the queue for the presentation layer
    pub fn queue_snapshot(&self) -> NotificationQueueResponse {
        let queue = self.queue.lock().unwrap();
        NotificationQueueResponse {
            current: queue.current.as_ref().map(Notification::to_dto),
            pending: queue.pending.iter().map(Notification::to_dto).collect(),
        }
    }

    /// Drop the current notification and promote the next pending one.
    pub fn dismiss_current(&self) -> NotificationQueueResponse {
        {
            let mut queue = self.queue.lock().unwrap();
            queue.promote_next(&self.ledger);
        }
        self.queue_snapshot()
    }

    /// Acknowledge a notification by ID: remove it from the queue and
    /// mark its identity in the ledger. Returns false for unknown IDs.
    pub fn acknowledge(&self, notification_id: &str) -> bool {
        let identity = {
            let mut queue = self.queue.lock().unwrap();

            if queue.current.as_ref().map(|n| n.id.as_str()) == Some(notification_id) {
                let identity = queue.current.as_ref().unwrap().identity;
                queue.promote_next(&self.ledger);
                Some(identity)
            } else if let Some(position) =
                queue.pending.iter().position(|n| n.id == notification_id)
            {
                queue.pending.remove(position).map(|n| n.identity)
            } else {
                None
            }
        };

        match identity {
            Some(identity) => {
                self.ledger.acknowledge(&identity);
                true
            }
            None => false,
        }
    }

    /// Clear the whole queue and acknowledge everything in the ledger.
    pub fn clear_all(&self) {
        {
            let mut queue = self.queue.lock().unwrap();
            queue.current = None;
            queue.pending.clear();
        }
        self.ledger.acknowledge_all();
        info!("Cleared all notifications");
    }
}
