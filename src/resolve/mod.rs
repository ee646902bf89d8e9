//! Specifier resolution
//!
//! Turns `workspace:` and `catalog:` specifiers into concrete version ranges:
//! - `workspace:*` / `workspace:^` / `workspace:` -> `^<project version>`
//! - `workspace:~` -> `~<project version>`
//! - `workspace:1.2.3` -> `<project version>`
//! - `catalog:<name>` -> entry in catalog `<name>`, or in `default` when
//!   `<name>` is empty or unknown
//!
//! The free functions are pure; `Resolver` bundles their lookup tables for the
//! scanner.

mod scanner;

pub use scanner::{scan, ScanResult, SkipReason, SkippedProject};

use crate::domain::{
    DependencySection, RangeOperator, ResolvedUpdate, Specifier, UpdateReason, DEFAULT_CATALOG,
};
use crate::workspace::Catalogs;
use std::collections::HashMap;

/// Resolve a `workspace:` specifier against the project versions.
///
/// Returns `None` if `spec` is not a workspace specifier or `dep_name` is not
/// a versioned workspace project.
pub fn resolve_workspace(
    dep_name: &str,
    spec: &str,
    versions: &HashMap<String, String>,
) -> Option<String> {
    let Specifier::Workspace { suffix } = Specifier::parse(spec) else {
        return None;
    };
    let base = versions.get(dep_name).filter(|v| !v.is_empty())?;
    Some(RangeOperator::from_workspace_suffix(suffix).apply(base))
}

/// Resolve a `catalog:` specifier against the named catalogs.
///
/// An unknown catalog name falls back to `default`. A known catalog that lacks
/// `dep_name` does not.
pub fn resolve_catalog(dep_name: &str, spec: &str, catalogs: &Catalogs) -> Option<String> {
    let Specifier::Catalog { name } = Specifier::parse(spec) else {
        return None;
    };
    let catalog = catalogs
        .get(name)
        .or_else(|| catalogs.get(DEFAULT_CATALOG))?;
    catalog
        .get(dep_name)
        .filter(|v| !v.is_empty())
        .cloned()
}

/// Lookup tables for one resolution run
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    versions: &'a HashMap<String, String>,
    catalogs: &'a Catalogs,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over project versions and catalogs
    pub fn new(versions: &'a HashMap<String, String>, catalogs: &'a Catalogs) -> Self {
        Self { versions, catalogs }
    }

    /// Resolve one manifest entry, or `None` if it is out of scope or unresolvable
    pub fn resolve(
        &self,
        dep_name: &str,
        raw: &str,
        section: DependencySection,
    ) -> Option<ResolvedUpdate> {
        let (to_version, reason) = match Specifier::parse(raw) {
            Specifier::Workspace { .. } => (
                resolve_workspace(dep_name, raw, self.versions)?,
                UpdateReason::Workspace,
            ),
            Specifier::Catalog { .. } => (
                resolve_catalog(dep_name, raw, self.catalogs)?,
                UpdateReason::Catalog,
            ),
            Specifier::Other(_) => return None,
        };

        Some(ResolvedUpdate::new(
            dep_name, raw, to_version, reason, section,
        ))
    }
}
