//! Image transfer capability
//!
//! The three primitives needed to copy an image between references without
//! rebuilding it. Implementations are assumed to be already authenticated
//! against every registry they touch.

use async_trait::async_trait;

use crate::error::TransferError;

#[async_trait]
pub trait ImageTransfer: Send + Sync {
    /// Fetch `reference` into the local image store
    async fn pull(&self, reference: &str) -> Result<(), TransferError>;

    /// Give the local image `source` the additional name `target`
    async fn retag(&self, source: &str, target: &str) -> Result<(), TransferError>;

    /// Upload the local image `reference` to its registry
    async fn push(&self, reference: &str) -> Result<(), TransferError>;
}
