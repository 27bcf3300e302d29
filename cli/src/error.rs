//! Centralized error types for retag
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.

use thiserror::Error;

/// Top-level error type for retag operations
#[derive(Error, Debug)]
pub enum RetagError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Configuration errors
///
/// Always fatal: detected before any pair reaches the transfer tool.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Version matrix is empty")]
    EmptyVersionMatrix,

    #[error("Registry group '{group}' has no image templates")]
    EmptyTemplates { group: String },

    #[error("Source and target branch are both '{branch}'")]
    SameBranch { branch: String },

    #[error("{which} branch name is empty")]
    EmptyBranch { which: &'static str },

    #[error("Malformed image template '{template}': {reason}")]
    MalformedTemplate { template: String, reason: String },

    #[error("Registry group '{group}' produced an invalid image reference: {reference}")]
    InvalidReference { group: String, reference: String },

    #[error("Registry group '{group}' would copy {reference} onto itself")]
    SelfCopy { group: String, reference: String },

    #[error("Registry group '{name}' is defined more than once")]
    DuplicateGroup { name: String },

    #[error("Concurrency must be at least 1")]
    InvalidConcurrency,
}

/// Errors from the external image transfer tool
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Failed to start `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("`{command}` exited with code {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{0}")]
    Rejected(String),
}
