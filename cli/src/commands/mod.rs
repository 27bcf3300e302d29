//! Subcommand implementations

pub mod copy;
