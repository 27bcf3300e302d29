//! Run outcome types
//!
//! A run copies a list of pairs; each pair is pull, retag, push in that order.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::image::ImagePair;

/// Individual steps of copying one image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStep {
    /// Pull the source reference into the local image store
    Pull,
    /// Tag the local source image with the target reference
    Retag,
    /// Push the target reference to its registry
    Push,
}

impl TransferStep {
    /// Get the step name used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pull => "pull",
            Self::Retag => "retag",
            Self::Push => "push",
        }
    }
}

impl fmt::Display for TransferStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pair whose copy stopped at `step`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairFailure {
    pub group: String,
    pub pair: ImagePair,
    pub step: TransferStep,
    pub reason: String,
}

/// Outcome of copying one pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairOutcome {
    Copied,
    Failed { step: TransferStep, reason: String },
    NotAttempted,
}

/// Aggregated result of a run
///
/// `total == succeeded + failed.len() + not_attempted`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub total: usize,
    pub succeeded: usize,
    /// Pairs skipped because the run was cancelled before they started
    pub not_attempted: usize,
    pub failed: Vec<PairFailure>,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one pair's outcome, in pair order
    pub fn record(&mut self, group: &str, pair: &ImagePair, outcome: PairOutcome) {
        self.total += 1;
        match outcome {
            PairOutcome::Copied => self.succeeded += 1,
            PairOutcome::Failed { step, reason } => self.failed.push(PairFailure {
                group: group.to_string(),
                pair: pair.clone(),
                step,
                reason,
            }),
            PairOutcome::NotAttempted => self.not_attempted += 1,
        }
    }

    /// Append another result after this one
    pub fn merge(&mut self, other: RunResult) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.not_attempted += other.not_attempted;
        self.failed.extend(other.failed);
    }

    /// Every pair was attempted and copied
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.not_attempted == 0
    }
}
