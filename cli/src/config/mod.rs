//! # Retag Configuration
//!
//! A run is described by [`RetagConfig`]: the branch pair, the python version
//! matrix and the registry groups. Groups come from the built-in set
//! (DockerHub, GitHub package registry, ghcr.io) or from a YAML groups file:
//!
//! ```yaml
//! python_versions: ["3.8", "3.9"]
//! groups:
//!   - name: dockerhub
//!     source_prefix: apache/airflow-ci
//!     target_prefix: apache/airflow-ci
//!     templates:
//!       - "{prefix}:python{python_version}-{branch}"
//!   - name: quay
//!     source_prefix: quay.io/apache/airflow
//!     target_prefix: quay.io/apache/airflow
//!     enabled: false
//!     templates:
//!       - "{prefix}:{branch}-python{python_version}"
//! ```

mod registry;

pub use registry::{
    builtin_groups, RegistryGroup, DEFAULT_DOCKERHUB_PREFIX, DOCKERHUB, GHCR_IO, GITHUB_REGISTRY,
};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ConfigError, RetagError};

pub const DEFAULT_PYTHON_VERSIONS: &[&str] = &["3.6", "3.7", "3.8"];
pub const DEFAULT_SOURCE_BRANCH: &str = "master";
pub const DEFAULT_TARGET_BRANCH: &str = "main";

/// Contents of a `--groups-file`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupsFile {
    /// Replaces the version matrix given on the command line
    #[serde(default)]
    pub python_versions: Option<Vec<String>>,

    pub groups: Vec<RegistryGroup>,
}

impl GroupsFile {
    /// Read and parse a groups file
    pub fn load(path: &Path) -> Result<Self, RetagError> {
        let content = std::fs::read_to_string(path).map_err(|source| RetagError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| RetagError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Per-group on/off switches from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupToggles {
    pub dockerhub: bool,
    pub registry: bool,
    pub ghcr_io: bool,
}

impl Default for GroupToggles {
    fn default() -> Self {
        Self {
            dockerhub: true,
            registry: true,
            ghcr_io: true,
        }
    }
}

impl GroupToggles {
    /// Whether the toggles allow the named group. Unknown names are allowed.
    pub fn allows(&self, group: &str) -> bool {
        match group {
            DOCKERHUB => self.dockerhub,
            GITHUB_REGISTRY => self.registry,
            GHCR_IO => self.ghcr_io,
            _ => true,
        }
    }
}

/// Validated description of one retag run
#[derive(Debug, Clone)]
pub struct RetagConfig {
    pub source_branch: String,
    pub target_branch: String,
    pub python_versions: Vec<String>,
    pub groups: Vec<RegistryGroup>,
}

impl RetagConfig {
    /// Create a config with the default version matrix and no groups
    pub fn new(source_branch: impl Into<String>, target_branch: impl Into<String>) -> Self {
        Self {
            source_branch: source_branch.into(),
            target_branch: target_branch.into(),
            python_versions: DEFAULT_PYTHON_VERSIONS
                .iter()
                .map(|v| v.to_string())
                .collect(),
            groups: Vec::new(),
        }
    }

    /// Builder: set the version matrix
    pub fn with_python_versions(mut self, versions: Vec<String>) -> Self {
        self.python_versions = versions;
        self
    }

    /// Builder: set registry groups
    pub fn with_groups(mut self, groups: Vec<RegistryGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// Builder: disable groups switched off on the command line
    pub fn with_toggles(mut self, toggles: GroupToggles) -> Self {
        for group in &mut self.groups {
            group.enabled = group.enabled && toggles.allows(&group.name);
        }
        self
    }

    /// Groups that will be copied, in declaration order
    pub fn enabled_groups(&self) -> impl Iterator<Item = &RegistryGroup> {
        self.groups.iter().filter(|g| g.enabled)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_branch.trim().is_empty() {
            return Err(ConfigError::EmptyBranch { which: "Source" });
        }
        if self.target_branch.trim().is_empty() {
            return Err(ConfigError::EmptyBranch { which: "Target" });
        }
        if self.source_branch == self.target_branch {
            return Err(ConfigError::SameBranch {
                branch: self.source_branch.clone(),
            });
        }
        if self.python_versions.is_empty() {
            return Err(ConfigError::EmptyVersionMatrix);
        }

        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.name.as_str()) {
                return Err(ConfigError::DuplicateGroup {
                    name: group.name.clone(),
                });
            }
        }

        if let Some(group) = self.enabled_groups().find(|g| g.templates.is_empty()) {
            return Err(ConfigError::EmptyTemplates {
                group: group.name.clone(),
            });
        }

        Ok(())
    }
}
