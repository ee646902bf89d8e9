//! Change detection for monorepo packages
//!
//! Decides which configured packages have files changed between two git
//! revisions:
//! - The compare base is `base_ref` when it is set, not the all-zero SHA and
//!   present in the repository; otherwise `HEAD~1`
//! - A package changed if any changed file lies under `<packagePath>/`
//! - Changed entries are emitted as a job matrix with every configured key kept

mod git;

pub use git::{parse_name_only, GitRunner, SystemGit};

use crate::error::ConfigError;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// SHA GitHub reports as `before` for new branches
pub const NULL_SHA: &str = "0000000000000000000000000000000000000000";

/// Base used when `base_ref` is unusable
pub const FALLBACK_BASE: &str = "HEAD~1";

/// One package entry from the config file, with all of its keys
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageConfig(IndexMap<String, Value>);

impl PackageConfig {
    /// Build an entry from its two required keys
    pub fn new(package_path: &str, target_repo: &str) -> Self {
        let mut fields = IndexMap::new();
        fields.insert("packagePath".to_string(), Value::from(package_path));
        fields.insert("targetRepo".to_string(), Value::from(target_repo));
        Self(fields)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Directory of the package relative to the repository root
    pub fn package_path(&self) -> Option<&str> {
        self.text("packagePath")
    }

    /// Repository the package is synced to
    pub fn target_repo(&self) -> Option<&str> {
        self.text("targetRepo")
    }

    /// Returns true if any of `files` lies under this package's directory
    pub fn is_touched_by(&self, files: &[String]) -> bool {
        let Some(package_path) = self.package_path() else {
            return false;
        };
        let prefix = format!("{}/", package_path);
        files.iter().any(|file| file.starts_with(&prefix))
    }
}

/// Contents of the detector config file
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DetectConfig {
    /// Configured packages
    #[serde(default)]
    pub packages: Option<Vec<PackageConfig>>,
}

impl DetectConfig {
    /// Load the config file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::not_found(path));
        }
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::invalid_json(path, e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::invalid_json(path, e.to_string()))
    }

    /// Configured packages (none when the key is absent)
    pub fn packages(&self) -> &[PackageConfig] {
        self.packages.as_deref().unwrap_or_default()
    }
}

/// Inputs to [`detect_changes`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectInput {
    /// Path to the JSON config file
    pub config_file: PathBuf,
    /// Base revision (may be empty)
    pub base_ref: String,
    /// Head revision
    pub head_ref: String,
}

/// Result of change detection
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectOutput {
    /// Changed packages in config order
    pub matrix: Vec<PackageConfig>,
    /// Whether any package changed
    pub has_changes: bool,
    /// Every changed file in the compared range
    pub changed_files: Vec<String>,
}

/// Pick the revision to diff against
pub fn compare_base(base_ref: &str, git: &impl GitRunner) -> String {
    if base_ref.is_empty() || base_ref == NULL_SHA {
        debug!("no usable base ref, falling back to {}", FALLBACK_BASE);
        return FALLBACK_BASE.to_string();
    }
    if !git.object_exists(base_ref) {
        debug!(
            "base ref {} not found (force push?), falling back to {}",
            base_ref, FALLBACK_BASE
        );
        return FALLBACK_BASE.to_string();
    }
    base_ref.to_string()
}

/// Detect which configured packages changed
pub fn detect_changes(
    input: &DetectInput,
    git: &impl GitRunner,
) -> Result<DetectOutput, ConfigError> {
    let base = compare_base(&input.base_ref, git);

    let changed_files = if git.object_exists(&base) {
        git.changed_files(&base, &input.head_ref)
            .unwrap_or_default()
    } else {
        debug!("compare base {} does not exist, no changed files", base);
        Vec::new()
    };

    let config = DetectConfig::load(&input.config_file)?;

    let matrix: Vec<PackageConfig> = config
        .packages()
        .iter()
        .filter(|pkg| {
            if pkg.package_path().is_none() || pkg.target_repo().is_none() {
                debug!("skipping incomplete package entry: {:?}", pkg);
                return false;
            }
            pkg.is_touched_by(&changed_files)
        })
        .cloned()
        .collect();

    Ok(DetectOutput {
        has_changes: !matrix.is_empty(),
        matrix,
        changed_files,
    })
}
