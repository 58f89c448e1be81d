//! Target configuration domain logic.
//!
//! Thin service over the targets repository: validates incoming target
//! values and keeps the persisted file in sync. A zero value means the
//! target is unset.

use anyhow::Result;
use log::info;

use shared::{TargetsResponse, UpdateTargetsRequest};

use crate::storage::{TargetsRepository, TargetsStorage};

/// Service for reading and updating earning targets
#[derive(Clone)]
pub struct TargetService {
    targets_repository: TargetsRepository,
}

impl TargetService {
    pub fn new(targets_repository: TargetsRepository) -> Self {
        Self { targets_repository }
    }

    /// Get the current targets (defaults are created on first read)
    pub async fn get_targets(&self) -> Result<TargetsResponse> {
        let targets = self.targets_repository.get_targets().await?;
        Ok(TargetsResponse { targets })
    }

    /// Validate and persist new targets
    pub async fn update_targets(&self, request: UpdateTargetsRequest) -> Result<TargetsResponse> {
        let targets = request.targets;

        if targets.daily_tip_amount < 0.0
            || targets.tip_percentage_point < 0.0
            || targets.daily_revenue_per_hour < 0.0
        {
            return Err(anyhow::anyhow!("Targets cannot be negative"));
        }
        if targets.tip_percentage_point > 100.0 {
            return Err(anyhow::anyhow!(
                "Tip percentage target cannot exceed 100"
            ));
        }

        self.targets_repository.update_targets(&targets).await?;
        info!("Targets updated");
        Ok(TargetsResponse { targets })
    }
}
