//! Domain layer - pure business logic
//!
//! This module contains business logic with no external I/O.
//! Types and functions here can be unit tested without mocking.

pub mod generator;
pub mod image;
pub mod run;
pub mod template;

// Re-export commonly used types
pub use generator::generate;
pub use image::ImagePair;
pub use run::{PairOutcome, RunResult, TransferStep};
pub use template::NameTemplate;
