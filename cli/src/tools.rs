//! Runtime tool path resolution
//!
//! For each tool (e.g., `docker`), we:
//! 1. Check for an environment variable `{TOOL}_BIN` (e.g., `DOCKER_BIN`)
//! 2. Fall back to PATH-based invocation if the envvar is not set
//!
//! This lets a Nix wrapper pin the exact binary while plain shells keep
//! working from PATH.
//!
//! ```rust,ignore
//! use crate::tools::get_tool_path;
//!
//! // Reads DOCKER_BIN, falls back to "docker"
//! let docker = get_tool_path("docker");
//! ```

use std::env;

/// Get the path to an external tool
///
/// Checks for an environment variable `{TOOL}_BIN` (uppercase tool name,
/// dashes replaced by underscores, + "_BIN"). Falls back to the tool name
/// itself, which relies on PATH.
pub fn get_tool_path(tool: &str) -> String {
    let env_var = format!("{}_BIN", tool.to_uppercase().replace('-', "_"));
    env::var(&env_var).unwrap_or_else(|_| tool.to_string())
}
