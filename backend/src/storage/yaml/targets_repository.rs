//! # Targets Repository
//!
//! File-based storage for the user's earning targets, kept in a single
//! YAML file `targets.yaml` at the root of the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! daily_tip_amount: 100.0
//! tip_percentage_point: 20.0
//! daily_revenue_per_hour: 30.0
//! ```

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

use shared::TargetConfig;

use super::connection::YamlConnection;

/// Storage trait for target configuration operations
#[async_trait]
pub trait TargetsStorage: Send + Sync {
    /// Get the current targets, creating defaults if none exist
    async fn get_targets(&self) -> Result<TargetConfig>;

    /// Replace the stored targets
    async fn update_targets(&self, targets: &TargetConfig) -> Result<()>;
}

/// YAML-file targets repository
#[derive(Clone)]
pub struct TargetsRepository {
    connection: YamlConnection,
}

impl TargetsRepository {
    pub fn new(connection: YamlConnection) -> Self {
        Self { connection }
    }

    fn targets_path(&self) -> PathBuf {
        self.connection.base_directory().join("targets.yaml")
    }

    fn save_targets(&self, targets: &TargetConfig) -> Result<()> {
        let path = self.targets_path();
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)?;
        }

        let yaml_content = serde_yaml::to_string(targets)?;

        // Atomic write: temp file, then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved targets to {:?}", path);
        Ok(())
    }
}

#[async_trait]
impl TargetsStorage for TargetsRepository {
    async fn get_targets(&self) -> Result<TargetConfig> {
        let path = self.targets_path();

        if path.exists() {
            let yaml_content = fs::read_to_string(&path)?;
            let targets: TargetConfig = serde_yaml::from_str(&yaml_content)?;
            debug!("Loaded targets from {:?}", path);
            Ok(targets)
        } else {
            let targets = TargetConfig::default();
            self.save_targets(&targets)?;
            info!("Created default targets at {:?}", path);
            Ok(targets)
        }
    }

    async fn update_targets(&self, targets: &TargetConfig) -> Result<()> {
        self.save_targets(targets)?;
        info!(
            "Updated targets: tip {:.2}%/sales, ${:.2}/day tips, ${:.2}/hour",
            targets.tip_percentage_point, targets.daily_tip_amount, targets.daily_revenue_per_hour
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (TargetsRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = YamlConnection::new(temp_dir.path()).expect("Failed to create connection");
        (TargetsRepository::new(connection), temp_dir)
    }

    #[tokio::test]
    async fn test_get_targets_creates_default() {
        let (repo, _temp_dir) = setup_test_repo();

        let targets = repo.get_targets().await.unwrap();
        assert_eq!(targets, TargetConfig::default());
    }

    #[tokio::test]
    async fn test_update_and_get_targets() {
        let (repo, _temp_dir) = setup_test_repo();

        let targets = TargetConfig {
            daily_tip_amount: 100.0,
            tip_percentage_point: 20.0,
            daily_revenue_per_hour: 30.0,
        };
        repo.update_targets(&targets).await.unwrap();

        let loaded = repo.get_targets().await.unwrap();
        assert_eq!(loaded, targets);
    }

    #[tokio::test]
    async fn test_targets_persist_across_instances() {
        let (repo, temp_dir) = setup_test_repo();

        let targets = TargetConfig {
            daily_tip_amount: 80.0,
            tip_percentage_point: 18.0,
            daily_revenue_per_hour: 25.0,
        };
        repo.update_targets(&targets).await.unwrap();

        // Simulate app restart with a fresh connection
        let connection2 = YamlConnection::new(temp_dir.path()).unwrap();
        let repo2 = TargetsRepository::new(connection2);

        let loaded = repo2.get_targets().await.unwrap();
        assert_eq!(loaded, targets);
    }
}
