//! Applying a resolved dependency map to a package.json
//!
//! This module provides:
//! - ManifestWriter for rewriting specifiers with resolved versions
//! - Dry-run mode support (no actual file modifications)
//! - Key order preservation when writing the manifest back

use super::PackageJson;
use crate::domain::{DependencySection, UpdateMap};
use crate::error::{ConfigError, ManifestError};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A single rewritten dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyChange {
    /// Dependency name
    pub dependency: String,
    /// Section the dependency was found in
    pub section: DependencySection,
    /// Specifier before the rewrite
    pub old_version: String,
    /// Specifier after the rewrite
    pub new_version: String,
}

/// Result of applying a dependency map to one manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceResult {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Changes applied (or that would be applied in dry-run mode)
    pub changes: Vec<DependencyChange>,
    /// Whether the file was actually written
    pub file_modified: bool,
}

impl ReplaceResult {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            changes: Vec::new(),
            file_modified: false,
        }
    }

    /// Returns true if any dependency was rewritten
    pub fn updated(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Writer for package.json files that applies resolved versions
pub struct ManifestWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a ManifestWriter in dry-run mode
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Rewrite the dependencies of the manifest at `path` listed under its
    /// package name in `dep_map`.
    ///
    /// Each dependency is rewritten in the first section that declares it;
    /// entries the manifest does not declare are ignored.
    pub fn apply(&self, dep_map: &UpdateMap, path: &Path) -> Result<ReplaceResult, ManifestError> {
        let mut result = ReplaceResult::new(path);
        let mut manifest = PackageJson::read(path)?;

        let package_name = manifest.name().unwrap_or_default().to_string();
        let Some(entries) = dep_map.get(&package_name) else {
            debug!("no entries for '{}' in dependency map", package_name);
            return Ok(result);
        };

        for (dependency, version) in entries {
            let Some(section) = manifest.find_section(dependency) else {
                debug!("{} is not declared in {}, skipping", dependency, path.display());
                continue;
            };

            if let Some(old) = manifest.set_dependency(section, dependency, version) {
                result.changes.push(DependencyChange {
                    dependency: dependency.clone(),
                    section,
                    old_version: spec_text(&old),
                    new_version: version.clone(),
                });
            }
        }

        if result.updated() && !self.dry_run {
            let content = manifest
                .to_pretty_string()
                .map_err(|e| ManifestError::write_error(path, e.into()))?;
            fs::write(path, content).map_err(|e| ManifestError::write_error(path, e))?;
            result.file_modified = true;
        }

        Ok(result)
    }
}

/// Parse the `dep-map` input produced by the resolve step
pub fn parse_dep_map(input: &str) -> Result<UpdateMap, ConfigError> {
    serde_json::from_str(input).map_err(|e| ConfigError::InvalidDepMap {
        message: e.to_string(),
    })
}

fn spec_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
