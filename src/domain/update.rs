//! Resolution result types

use super::DependencySection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Package name -> dependency name -> resolved version
///
/// Keys keep the order they were first inserted in; overwriting a value keeps
/// the key where it was.
pub type UpdateMap = IndexMap<String, IndexMap<String, String>>;

/// Which protocol a resolved specifier used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateReason {
    /// `workspace:` specifier resolved against a local project
    Workspace,
    /// `catalog:` specifier resolved against a pnpm catalog
    Catalog,
}

impl fmt::Display for UpdateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateReason::Workspace => write!(f, "workspace"),
            UpdateReason::Catalog => write!(f, "catalog"),
        }
    }
}

/// A specifier that resolved to a concrete version range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUpdate {
    /// Dependency name as written in the manifest
    pub dependency_name: String,
    /// Original specifier (e.g., `workspace:^`)
    pub from_specifier: String,
    /// Resolved version range (e.g., `^1.2.3`)
    pub to_version: String,
    /// Protocol that was resolved
    pub reason: UpdateReason,
    /// Section the dependency was declared in
    pub section: DependencySection,
}

impl ResolvedUpdate {
    /// Creates a new ResolvedUpdate
    pub fn new(
        dependency_name: impl Into<String>,
        from_specifier: impl Into<String>,
        to_version: impl Into<String>,
        reason: UpdateReason,
        section: DependencySection,
    ) -> Self {
        Self {
            dependency_name: dependency_name.into(),
            from_specifier: from_specifier.into(),
            to_version: to_version.into(),
            reason,
            section,
        }
    }
}

impl fmt::Display for ResolvedUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} [{}, {}]",
            self.dependency_name, self.from_specifier, self.to_version, self.reason, self.section
        )
    }
}
