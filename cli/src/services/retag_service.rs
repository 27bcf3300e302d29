//! Retag service - orchestrates a run across registry groups
//!
//! Every enabled group is expanded before the first image is touched, so a
//! configuration error aborts the run with nothing copied. Groups are then
//! replicated one after another in declaration order.

use tracing::info;

use super::replication::Replicator;
use crate::config::RetagConfig;
use crate::domain::{generate, ImagePair, RunResult};
use crate::error::ConfigError;

/// Pairs generated for one enabled registry group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    pub name: String,
    pub pairs: Vec<ImagePair>,
}

/// Service for copying every group's images from one branch to another
pub struct RetagService {
    replicator: Replicator,
}

impl RetagService {
    /// Create a new retag service
    pub fn new(replicator: Replicator) -> Self {
        Self { replicator }
    }

    /// Validate the configuration and expand every enabled group
    pub fn plan(config: &RetagConfig) -> Result<Vec<GroupPlan>, ConfigError> {
        config.validate()?;

        config
            .enabled_groups()
            .map(|group| {
                let pairs = generate(
                    group,
                    &config.python_versions,
                    &config.source_branch,
                    &config.target_branch,
                )?;
                Ok(GroupPlan {
                    name: group.name.clone(),
                    pairs,
                })
            })
            .collect()
    }

    /// Execute a full retag run
    pub async fn run(&self, config: &RetagConfig) -> Result<RunResult, ConfigError> {
        let plans = Self::plan(config)?;
        Ok(self.execute(&plans).await)
    }

    /// Replicate already planned groups
    async fn execute(&self, plans: &[GroupPlan]) -> RunResult {
        let mut result = RunResult::new();

        for plan in plans {
            info!("[{}] Copying {} image(s)", plan.name, plan.pairs.len());
            result.merge(self.replicator.replicate(&plan.name, &plan.pairs).await);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{builtin_groups, GroupToggles, RegistryGroup, DEFAULT_DOCKERHUB_PREFIX};
    use crate::domain::TransferStep;
    use crate::infrastructure::testing::RecordingTransfer;
    use std::sync::Arc;

    fn airflow_ci_group() -> RegistryGroup {
        RegistryGroup::new(
            "dockerhub",
            "apache/airflow-ci",
            "apache/airflow-ci",
            &["{prefix}:python{python_version}-{branch}"],
        )
        .unwrap()
    }

    fn single_pair_config() -> RetagConfig {
        RetagConfig::new("master", "main")
            .with_python_versions(vec!["3.8".to_string()])
            .with_groups(vec![airflow_ci_group()])
    }

    #[tokio::test]
    async fn test_end_to_end_success() {
        let transfer = Arc::new(RecordingTransfer::new());
        let service = RetagService::new(Replicator::new(transfer.clone()));

        let result = service.run(&single_pair_config()).await.unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.succeeded, 1);
        assert!(result.failed.is_empty());
        assert_eq!(
            transfer.calls(),
            vec![
                "pull apache/airflow-ci:python3.8-master",
                "retag apache/airflow-ci:python3.8-master apache/airflow-ci:python3.8-main",
                "push apache/airflow-ci:python3.8-main",
            ]
        );
    }

    #[tokio::test]
    async fn test_end_to_end_push_forbidden() {
        let transfer = Arc::new(RecordingTransfer::new().fail(
            TransferStep::Push,
            "apache/airflow-ci:python3.8-main",
            "403 Forbidden",
        ));
        let service = RetagService::new(Replicator::new(transfer));

        let result = service.run(&single_pair_config()).await.unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.succeeded, 0);
        assert_eq!(result.failed.len(), 1);
        let failure = &result.failed[0];
        assert_eq!(
            failure.pair,
            ImagePair::new(
                "apache/airflow-ci:python3.8-master",
                "apache/airflow-ci:python3.8-main"
            )
        );
        assert_eq!(failure.step, TransferStep::Push);
        assert_eq!(failure.reason, "403 Forbidden");
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_all_groups_disabled_is_empty_run() {
        let transfer = Arc::new(RecordingTransfer::new());
        let service = RetagService::new(Replicator::new(transfer.clone()));
        let config = RetagConfig::new("master", "main")
            .with_groups(builtin_groups(DEFAULT_DOCKERHUB_PREFIX, DEFAULT_DOCKERHUB_PREFIX).unwrap())
            .with_toggles(GroupToggles {
                dockerhub: false,
                registry: false,
                ghcr_io: false,
            });

        let result = service.run(&config).await.unwrap();

        assert_eq!(result, RunResult::new());
        assert!(transfer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_configuration_error_copies_nothing() {
        let transfer = Arc::new(RecordingTransfer::new());
        let service = RetagService::new(Replicator::new(transfer.clone()));
        // Second group renders an invalid reference; the first must not run either
        let bad = RegistryGroup::new("bad", "Repo", "Repo", &["{prefix}:{branch}"]).unwrap();
        let config = single_pair_config().with_groups(vec![airflow_ci_group(), bad]);

        let err = service.run(&config).await.unwrap_err();

        assert!(matches!(err, ConfigError::InvalidReference { .. }));
        assert!(transfer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_same_branch_copies_nothing() {
        let transfer = Arc::new(RecordingTransfer::new());
        let service = RetagService::new(Replicator::new(transfer.clone()));
        let mut config = single_pair_config();
        config.target_branch = "master".to_string();

        assert!(matches!(
            service.run(&config).await,
            Err(ConfigError::SameBranch { .. })
        ));
        assert!(transfer.calls().is_empty());
    }

    #[test]
    fn test_plan_follows_group_declaration_order() {
        let config = RetagConfig::new("master", "main")
            .with_groups(builtin_groups(DEFAULT_DOCKERHUB_PREFIX, DEFAULT_DOCKERHUB_PREFIX).unwrap())
            .with_toggles(GroupToggles {
                dockerhub: true,
                registry: false,
                ghcr_io: true,
            });

        let plans = RetagService::plan(&config).unwrap();

        let names: Vec<&str> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["dockerhub", "ghcr_io"]);
        assert_eq!(plans[0].pairs.len(), 3 * 5);
        assert_eq!(plans[1].pairs.len(), 3 * 3);
    }

    #[tokio::test]
    async fn test_groups_run_in_order_and_merge() {
        let ghcr = RegistryGroup::new(
            "ghcr_io",
            "ghcr.io/apache/airflow",
            "ghcr.io/apache/airflow",
            &["{prefix}-{branch}-python{python_version}-v2:latest"],
        )
        .unwrap();
        let config = single_pair_config().with_groups(vec![airflow_ci_group(), ghcr]);
        let transfer = Arc::new(RecordingTransfer::new().fail(
            TransferStep::Pull,
            "apache/airflow-ci:python3.8-master",
            "toomanyrequests",
        ));
        let service = RetagService::new(Replicator::new(transfer.clone()));

        let result = service.run(&config).await.unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.succeeded, 1);
        assert_eq!(result.failed[0].group, "dockerhub");
        assert_eq!(
            transfer.calls().last().map(String::as_str),
            Some("push ghcr.io/apache/airflow-main-python3.8-v2:latest")
        );
    }
}
