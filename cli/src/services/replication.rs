//! Replication driver
//!
//! Copies each pair with pull, retag, push. A failing step ends that pair
//! only; the run always moves on to the next pair. Nothing is rolled back,
//! so a failed push can leave the target tag missing or stale.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::domain::{ImagePair, PairOutcome, RunResult, TransferStep};
use crate::infrastructure::ImageTransfer;

/// Drives the image transfer capability over a list of pairs
pub struct Replicator {
    transfer: Arc<dyn ImageTransfer>,
    concurrency: usize,
    cancel: CancellationToken,
}

impl Replicator {
    /// Create a strictly sequential replicator
    pub fn new(transfer: Arc<dyn ImageTransfer>) -> Self {
        Self {
            transfer,
            concurrency: 1,
            cancel: CancellationToken::new(),
        }
    }

    /// Builder: copy up to `concurrency` pairs at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Builder: stop starting new pairs once `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Copy every pair and report the outcome in pair order
    pub async fn replicate(&self, group: &str, pairs: &[ImagePair]) -> RunResult {
        let outcomes = if self.concurrency == 1 {
            self.replicate_sequential(group, pairs).await
        } else {
            self.replicate_pooled(group, pairs).await
        };

        let mut result = RunResult::new();
        for (pair, outcome) in pairs.iter().zip(outcomes) {
            result.record(group, pair, outcome);
        }

        if result.not_attempted > 0 {
            warn!(
                "[{}] Cancelled: {} image(s) not attempted",
                group, result.not_attempted
            );
        }

        result
    }

    async fn replicate_sequential(&self, group: &str, pairs: &[ImagePair]) -> Vec<PairOutcome> {
        let mut outcomes = Vec::with_capacity(pairs.len());

        for pair in pairs {
            if self.cancel.is_cancelled() {
                outcomes.push(PairOutcome::NotAttempted);
                continue;
            }
            outcomes.push(copy_pair(self.transfer.as_ref(), group, pair).await);
        }

        outcomes
    }

    async fn replicate_pooled(&self, group: &str, pairs: &[ImagePair]) -> Vec<PairOutcome> {
        // Never more permits than pairs
        let permits = self.concurrency.min(pairs.len()).max(1);
        let semaphore = Arc::new(Semaphore::new(permits));
        let mut tasks = JoinSet::new();

        for (index, pair) in pairs.iter().enumerate() {
            let permit = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let transfer = Arc::clone(&self.transfer);
            let group = group.to_string();
            let pair = pair.clone();
            tasks.spawn(async move {
                let _permit = permit;
                (index, copy_pair(transfer.as_ref(), &group, &pair).await)
            });
        }

        let mut outcomes = vec![None; pairs.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(e) => std::panic::resume_unwind(e.into_panic()),
            }
        }

        outcomes
            .into_iter()
            .map(|outcome| outcome.unwrap_or(PairOutcome::NotAttempted))
            .collect()
    }
}

/// Pull, retag and push one pair, stopping at the first failing step
pub async fn copy_pair(transfer: &dyn ImageTransfer, group: &str, pair: &ImagePair) -> PairOutcome {
    info!("Copying image: {} -> {}", pair.source, pair.target);

    let result = async {
        transfer
            .pull(&pair.source)
            .await
            .map_err(|e| (TransferStep::Pull, e))?;
        transfer
            .retag(&pair.source, &pair.target)
            .await
            .map_err(|e| (TransferStep::Retag, e))?;
        transfer
            .push(&pair.target)
            .await
            .map_err(|e| (TransferStep::Push, e))
    }
    .await;

    match result {
        Ok(()) => PairOutcome::Copied,
        Err((step, e)) => {
            error!("[{}] {} failed for {}: {}", group, step, pair, e);
            PairOutcome::Failed {
                step,
                reason: e.to_string(),
            }
        }
    }
}
