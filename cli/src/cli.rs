//! CLI definitions for retag
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Parser, Subcommand};
use std::time::Duration;

use crate::config::{DEFAULT_DOCKERHUB_PREFIX, DEFAULT_SOURCE_BRANCH, DEFAULT_TARGET_BRANCH};

#[derive(Parser)]
#[command(
    name = "retag",
    version,
    about = "Mirror per-branch container images across registries",
    long_about = "Copies every image built for one branch to another branch's tags.\n\
                  Useful when starting a release branch or renaming a branch (master -> main)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy all images of the source branch to the target branch
    Copy {
        /// Source DockerHub repository
        #[arg(long, default_value = DEFAULT_DOCKERHUB_PREFIX)]
        source_dockerhub: String,

        /// Target DockerHub repository
        #[arg(long, default_value = DEFAULT_DOCKERHUB_PREFIX)]
        target_dockerhub: String,

        /// Source branch name
        #[arg(long, default_value = DEFAULT_SOURCE_BRANCH)]
        source_branch: String,

        /// Target branch name
        #[arg(long, default_value = DEFAULT_TARGET_BRANCH)]
        target_branch: String,

        /// Copy DockerHub images (default)
        #[arg(long, overrides_with = "no_dockerhub")]
        dockerhub: bool,

        /// Skip DockerHub
        #[arg(long, overrides_with = "dockerhub")]
        no_dockerhub: bool,

        /// Copy GitHub package registry (docker.pkg.github.com) images (default)
        #[arg(long, overrides_with = "no_registry")]
        registry: bool,

        /// Skip the GitHub package registry
        #[arg(long, overrides_with = "registry")]
        no_registry: bool,

        /// Copy ghcr.io images (default)
        #[arg(long, overrides_with = "no_ghcr_io")]
        ghcr_io: bool,

        /// Skip ghcr.io
        #[arg(long, overrides_with = "ghcr_io")]
        no_ghcr_io: bool,

        /// Python versions to copy (repeatable or comma separated)
        #[arg(
            long = "python-version",
            value_delimiter = ',',
            default_values = ["3.6", "3.7", "3.8"]
        )]
        python_versions: Vec<String>,

        /// YAML file replacing the built-in registry groups
        #[arg(long, env = "RETAG_GROUPS_FILE")]
        groups_file: Option<String>,

        /// Number of images copied at once (1 = strictly sequential)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
        concurrency: u16,

        /// Total attempts per pull/push (1 = no retry)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        attempts: u32,

        /// Pause between pull/push attempts (e.g. "2s", "500ms")
        #[arg(long, default_value = "2s", value_parser = humantime::parse_duration)]
        retry_delay: Duration,

        /// Docker-compatible CLI used for pull/tag/push
        #[arg(long, env = "CONTAINER_TOOL", default_value = "docker")]
        container_tool: String,

        /// Print the image pairs without copying anything
        #[arg(long)]
        dry_run: bool,

        /// Write the run result as JSON to this path
        #[arg(long)]
        report: Option<String>,
    },
}
