//! In-memory image transfer for tests

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::transfer::ImageTransfer;
use crate::domain::TransferStep;
use crate::error::TransferError;

/// Records every call; fails the configured (step, reference) combinations
#[derive(Default)]
pub struct RecordingTransfer {
    calls: Mutex<Vec<String>>,
    failures: Vec<(TransferStep, String, String)>,
    delay: Option<Duration>,
    cancel_on_first_pull: Option<CancellationToken>,
}

impl RecordingTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail `step` for `reference` (the source reference for retag)
    pub fn fail(mut self, step: TransferStep, reference: &str, reason: &str) -> Self {
        self.failures
            .push((step, reference.to_string(), reason.to_string()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Cancel `token` while the first pull is in flight
    pub fn cancel_on_first_pull(mut self, token: CancellationToken) -> Self {
        self.cancel_on_first_pull = Some(token);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn call(&self, step: TransferStep, reference: &str, entry: String) -> Result<(), TransferError> {
        self.calls.lock().unwrap().push(entry);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self
            .failures
            .iter()
            .find(|(s, r, _)| *s == step && r == reference)
        {
            Some((_, _, reason)) => Err(TransferError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ImageTransfer for RecordingTransfer {
    async fn pull(&self, reference: &str) -> Result<(), TransferError> {
        if let Some(token) = &self.cancel_on_first_pull {
            token.cancel();
        }
        self.call(TransferStep::Pull, reference, format!("pull {}", reference))
            .await
    }

    async fn retag(&self, source: &str, target: &str) -> Result<(), TransferError> {
        self.call(TransferStep::Retag, source, format!("retag {} {}", source, target))
            .await
    }

    async fn push(&self, reference: &str) -> Result<(), TransferError> {
        self.call(TransferStep::Push, reference, format!("push {}", reference))
            .await
    }
}
