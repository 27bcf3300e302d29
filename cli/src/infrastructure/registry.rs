//! Container registry operations
//!
//! Copies images by shelling out to a docker-compatible CLI
//! (`pull`, `tag`, `push`). Pull and push are retried; tag is local.
//!
//! Each child gets its own process group, so a terminal Ctrl-C reaches only
//! retag itself and an in-flight pull or push is never killed halfway.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use super::transfer::ImageTransfer;
use crate::error::TransferError;
use crate::tools::get_tool_path;

/// Image transfer through a docker-compatible command line tool
pub struct ContainerCli {
    tool: String,
    binary: String,
    attempts: u32,
    retry_delay: Duration,
}

impl ContainerCli {
    /// Create a client for `tool`, honoring `{TOOL}_BIN`
    pub fn new(tool: &str) -> Self {
        Self::with_binary(tool, get_tool_path(tool))
    }

    /// Create a client for an explicit binary path
    pub fn with_binary(tool: impl Into<String>, binary: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            binary: binary.into(),
            attempts: 1,
            retry_delay: Duration::from_secs(2),
        }
    }

    /// Set total attempts per pull/push (minimum 1)
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Set pause between attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Resolve the tool binary before any image is touched
    pub fn preflight(&self) -> Result<PathBuf, TransferError> {
        which::which(&self.binary).map_err(|e| TransferError::Spawn {
            command: self.binary.clone(),
            message: e.to_string(),
        })
    }

    async fn run(&self, args: &[&str]) -> Result<(), TransferError> {
        let command = format!("{} {}", self.tool, args.join(" "));
        debug!("Running: {}", command);

        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        cmd.process_group(0);

        let output = cmd
            .output()
            .await
            .map_err(|e| TransferError::Spawn {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(TransferError::CommandFailed {
            command,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    async fn run_with_retries(&self, args: &[&str]) -> Result<(), TransferError> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.run(args).await {
                Ok(()) => return Ok(()),
                Err(e) if attempts < self.attempts => {
                    warn!(
                        "{} {} attempt {} failed, retrying: {}",
                        self.tool, args[0], attempts, e
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl ImageTransfer for ContainerCli {
    async fn pull(&self, reference: &str) -> Result<(), TransferError> {
        self.run_with_retries(&["pull", reference]).await
    }

    async fn retag(&self, source: &str, target: &str) -> Result<(), TransferError> {
        self.run(&["tag", source, target]).await
    }

    async fn push(&self, reference: &str) -> Result<(), TransferError> {
        self.run_with_retries(&["push", reference]).await
    }
}
