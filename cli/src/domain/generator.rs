//! Reference generation
//!
//! Expands one registry group over the version matrix into copy pairs.
//! Pure: no I/O, same inputs always give the same pairs in the same order.

use crate::config::RegistryGroup;
use crate::error::ConfigError;

use super::image::{is_valid_reference, ImagePair};

/// Expand `group` into (source, target) pairs
///
/// Outer loop is the version matrix, inner loop the group's templates, so
/// the result has `versions.len() * group.templates.len()` pairs.
///
/// # Errors
///
/// Any rendered reference that is not a valid image reference, or a pair
/// whose source and target are equal, is a configuration error.
pub fn generate(
    group: &RegistryGroup,
    versions: &[String],
    source_branch: &str,
    target_branch: &str,
) -> Result<Vec<ImagePair>, ConfigError> {
    if versions.is_empty() {
        return Err(ConfigError::EmptyVersionMatrix);
    }
    if group.templates.is_empty() {
        return Err(ConfigError::EmptyTemplates {
            group: group.name.clone(),
        });
    }
    if source_branch == target_branch {
        return Err(ConfigError::SameBranch {
            branch: source_branch.to_string(),
        });
    }

    let mut pairs = Vec::with_capacity(versions.len() * group.templates.len());

    for version in versions {
        for template in &group.templates {
            let source = template.render(&group.source_prefix, source_branch, version);
            let target = template.render(&group.target_prefix, target_branch, version);

            for reference in [&source, &target] {
                if !is_valid_reference(reference) {
                    return Err(ConfigError::InvalidReference {
                        group: group.name.clone(),
                        reference: reference.clone(),
                    });
                }
            }
            if source == target {
                return Err(ConfigError::SelfCopy {
                    group: group.name.clone(),
                    reference: source,
                });
            }

            pairs.push(ImagePair::new(source, target));
        }
    }

    Ok(pairs)
}
