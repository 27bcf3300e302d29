//! Services layer - orchestration logic
//!
//! This module coordinates between domain logic and infrastructure.
//! Services use infrastructure adapters to perform I/O operations.

pub mod replication;
pub mod retag_service;

// Re-export commonly used types
pub use replication::Replicator;
pub use retag_service::{GroupPlan, RetagService};
