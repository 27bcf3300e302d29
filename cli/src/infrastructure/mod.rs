//! Infrastructure layer - external I/O adapters
//!
//! This module contains all code that interacts with external systems:
//! - The image transfer capability (pull, retag, push)
//! - Container registries via a docker-compatible CLI

pub mod registry;
pub mod transfer;

// Re-export commonly used types
pub use registry::ContainerCli;
pub use transfer::ImageTransfer;

#[cfg(test)]
pub mod testing;
