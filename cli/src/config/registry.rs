//! Registry group configuration: one naming convention per container registry.

use serde::{Deserialize, Serialize};

use crate::domain::NameTemplate;
use crate::error::ConfigError;

/// Built-in group names, matched by the `--no-*` toggles
pub const DOCKERHUB: &str = "dockerhub";
pub const GITHUB_REGISTRY: &str = "registry";
pub const GHCR_IO: &str = "ghcr_io";

pub const DEFAULT_DOCKERHUB_PREFIX: &str = "apache/airflow-ci";
const GITHUB_REGISTRY_PREFIX: &str = "docker.pkg.github.com/apache/airflow";
const GHCR_IO_PREFIX: &str = "ghcr.io/apache/airflow";

const DOCKERHUB_TEMPLATES: &[&str] = &[
    "{prefix}:python{python_version}-{branch}",
    "{prefix}:{branch}-python{python_version}-ci",
    "{prefix}:{branch}-python{python_version}-ci-manifest",
    "{prefix}:{branch}-python{python_version}",
    "{prefix}:{branch}-python{python_version}-build",
];

const GITHUB_REGISTRY_TEMPLATES: &[&str] = &[
    "{prefix}/{branch}-python{python_version}-ci-v2:latest",
    "{prefix}/{branch}-python{python_version}-v2:latest",
    "{prefix}/{branch}-python{python_version}-build-v2:latest",
];

const GHCR_IO_TEMPLATES: &[&str] = &[
    "{prefix}-{branch}-python{python_version}-ci-v2:latest",
    "{prefix}-{branch}-python{python_version}-v2:latest",
    "{prefix}-{branch}-python{python_version}-build-v2:latest",
];

/// One container registry's naming convention family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryGroup {
    /// Group identifier (e.g., "dockerhub", "ghcr_io")
    pub name: String,

    /// Substituted for `{prefix}` in source references
    pub source_prefix: String,

    /// Substituted for `{prefix}` in target references
    pub target_prefix: String,

    /// Templates in declaration order
    pub templates: Vec<NameTemplate>,

    /// Disabled groups contribute no pairs
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl RegistryGroup {
    /// Create an enabled group from raw templates
    pub fn new(
        name: impl Into<String>,
        source_prefix: impl Into<String>,
        target_prefix: impl Into<String>,
        templates: &[&str],
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            name: name.into(),
            source_prefix: source_prefix.into(),
            target_prefix: target_prefix.into(),
            templates: templates
                .iter()
                .map(|t| NameTemplate::parse(*t))
                .collect::<Result<_, _>>()?,
            enabled: true,
        })
    }
}

/// DockerHub, GitHub package registry and ghcr.io groups
pub fn builtin_groups(
    source_dockerhub: &str,
    target_dockerhub: &str,
) -> Result<Vec<RegistryGroup>, ConfigError> {
    Ok(vec![
        RegistryGroup::new(
            DOCKERHUB,
            source_dockerhub,
            target_dockerhub,
            DOCKERHUB_TEMPLATES,
        )?,
        RegistryGroup::new(
            GITHUB_REGISTRY,
            GITHUB_REGISTRY_PREFIX,
            GITHUB_REGISTRY_PREFIX,
            GITHUB_REGISTRY_TEMPLATES,
        )?,
        RegistryGroup::new(GHCR_IO, GHCR_IO_PREFIX, GHCR_IO_PREFIX, GHCR_IO_TEMPLATES)?,
    ])
}
