//! Copy command: mirror every image of one branch onto another branch

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::config::{builtin_groups, GroupToggles, GroupsFile, RetagConfig};
use crate::domain::RunResult;
use crate::error::{ConfigError, RetagError};
use crate::infrastructure::ContainerCli;
use crate::services::{Replicator, RetagService};
use crate::ui::{print_header, print_info, print_plan, print_summary, print_warning};

/// Options of the `copy` subcommand
#[derive(Debug, Clone)]
pub struct CopyOptions {
    pub source_dockerhub: String,
    pub target_dockerhub: String,
    pub source_branch: String,
    pub target_branch: String,
    pub toggles: GroupToggles,
    pub python_versions: Vec<String>,
    pub groups_file: Option<PathBuf>,
    pub concurrency: usize,
    pub attempts: u32,
    pub retry_delay: Duration,
    pub container_tool: String,
    pub dry_run: bool,
    pub report: Option<PathBuf>,
}

/// JSON document written by `--report`
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    run_id: Uuid,
    started_at: String,
    finished_at: String,
    source_branch: &'a str,
    target_branch: &'a str,
    groups: Vec<&'a str>,
    #[serde(flatten)]
    result: &'a RunResult,
}

/// Build the run configuration from command line options
pub fn build_config(options: &CopyOptions) -> Result<RetagConfig, RetagError> {
    let (groups, python_versions) = match &options.groups_file {
        Some(path) => {
            let file = GroupsFile::load(path)?;
            info!("Loaded {} registry group(s) from {}", file.groups.len(), path.display());
            let versions = file
                .python_versions
                .unwrap_or_else(|| options.python_versions.clone());
            (file.groups, versions)
        }
        None => (
            builtin_groups(&options.source_dockerhub, &options.target_dockerhub)?,
            options.python_versions.clone(),
        ),
    };

    Ok(
        RetagConfig::new(&options.source_branch, &options.target_branch)
            .with_python_versions(python_versions)
            .with_groups(groups)
            .with_toggles(options.toggles),
    )
}

/// Process exit status for a finished run: 1 if any pair failed or was never attempted
pub fn exit_code(result: &RunResult) -> i32 {
    if result.is_success() {
        0
    } else {
        1
    }
}

pub async fn execute(options: CopyOptions, cancel: CancellationToken) -> Result<RunResult> {
    if options.concurrency == 0 {
        return Err(RetagError::from(ConfigError::InvalidConcurrency).into());
    }

    let config = build_config(&options)?;
    // Expanding every group up front surfaces configuration errors before
    // the container tool is looked up
    let plans = RetagService::plan(&config).map_err(RetagError::from)?;

    print_header(&format!(
        "Copy images {} -> {}",
        config.source_branch, config.target_branch
    ));

    if options.dry_run {
        print_plan(&plans);
        print_info("Dry run: no images were copied");
        return Ok(RunResult::new());
    }

    if plans.is_empty() {
        print_warning("All registry groups are disabled, nothing to copy");
        return Ok(RunResult::new());
    }

    let cli = ContainerCli::new(&options.container_tool)
        .with_attempts(options.attempts)
        .with_retry_delay(options.retry_delay);
    let binary = cli
        .preflight()
        .with_context(|| format!("{} is required to copy images", options.container_tool))?;
    info!("Using {}", binary.display());

    let replicator = Replicator::new(Arc::new(cli))
        .with_concurrency(options.concurrency)
        .with_cancellation(cancel);
    let service = RetagService::new(replicator);

    let started_at = Utc::now();
    let start = Instant::now();
    let result = service.run(&config).await.map_err(RetagError::from)?;
    print_summary(&result, start.elapsed());

    if let Some(path) = &options.report {
        let report = RunReport {
            run_id: Uuid::new_v4(),
            started_at: started_at.to_rfc3339(),
            finished_at: Utc::now().to_rfc3339(),
            source_branch: &config.source_branch,
            target_branch: &config.target_branch,
            groups: plans.iter().map(|p| p.name.as_str()).collect(),
            result: &result,
        };
        write_report(path, &report).await?;
        info!("Report written to {}", path.display());
    }

    Ok(result)
}

async fn write_report(path: &Path, report: &RunReport<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
