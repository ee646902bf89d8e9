//! Manifest scanner
//!
//! Reads each project's package.json and resolves every `workspace:` and
//! `catalog:` entry in the four dependency sections. Projects without a
//! readable manifest are reported and skipped, never fatal.

use super::Resolver;
use crate::domain::{DependencySection, Project, ResolvedUpdate, Specifier};
use crate::error::ManifestError;
use crate::manifest::PackageJson;
use log::debug;
use std::fmt;

/// Why a project contributed nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No package.json in the project directory
    MissingManifest,
    /// package.json exists but could not be read
    UnreadableManifest(String),
    /// package.json is not a JSON object
    MalformedManifest(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingManifest => write!(f, "no package.json"),
            SkipReason::UnreadableManifest(msg) => write!(f, "unreadable package.json: {}", msg),
            SkipReason::MalformedManifest(msg) => write!(f, "malformed package.json: {}", msg),
        }
    }
}

impl From<ManifestError> for SkipReason {
    fn from(err: ManifestError) -> Self {
        match err {
            ManifestError::NotFound { .. } => SkipReason::MissingManifest,
            ManifestError::JsonParseError { .. } => SkipReason::MalformedManifest(err.to_string()),
            other => SkipReason::UnreadableManifest(other.to_string()),
        }
    }
}

/// A project that was not scanned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProject {
    /// The project
    pub project: Project,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Output of a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// `(owning package name, update)` in scan order
    pub updates: Vec<(String, ResolvedUpdate)>,
    /// Projects that were skipped
    pub skipped: Vec<SkippedProject>,
    /// Number of manifests actually scanned
    pub scanned: usize,
}

/// Scan the manifests of `projects` in order.
///
/// Updates are owned by the manifest's declared name, falling back to the
/// name pnpm recorded for the project.
pub fn scan(projects: &[Project], resolver: &Resolver<'_>) -> ScanResult {
    let mut result = ScanResult::default();

    for project in projects {
        let manifest = match PackageJson::read(&project.manifest_path()) {
            Ok(manifest) => manifest,
            Err(e) => {
                let reason = SkipReason::from(e);
                debug!("skipping {}: {}", project, reason);
                result.skipped.push(SkippedProject {
                    project: project.clone(),
                    reason,
                });
                continue;
            }
        };

        let package_name = manifest.name().unwrap_or(&project.name).to_string();

        for section in DependencySection::all() {
            for (dep_name, raw) in manifest.dependency_specs(*section) {
                match resolver.resolve(dep_name, raw, *section) {
                    Some(update) => {
                        debug!("{}: {}", package_name, update);
                        result.updates.push((package_name.clone(), update));
                    }
                    None if Specifier::parse(raw).is_resolvable() => {
                        debug!("{}: could not resolve {}@{}", package_name, dep_name, raw);
                    }
                    None => {}
                }
            }
        }

        result.scanned += 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UpdateReason;
    use crate::workspace::{Catalog, Catalogs};
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("package.json"), content).unwrap();
    }

    fn versions() -> HashMap<String, String> {
        [("pkg-a", "1.0.0"), ("pkg-b", "2.0.0")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn catalogs() -> Catalogs {
        let default: Catalog = [("lodash".to_string(), "4.17.21".to_string())]
            .into_iter()
            .collect();
        [("default".to_string(), default)].into_iter().collect()
    }

    #[test]
    fn test_scan_resolves_all_sections_in_order() {
        let dir = TempDir::new().unwrap();
        let pkg_b = dir.path().join("b");
        write_manifest(
            &pkg_b,
            r#"{
                "name": "pkg-b",
                "optionalDependencies": { "opt": "workspace:*" },
                "peerDependencies": { "pkg-a": "workspace:^" },
                "devDependencies": { "lodash": "catalog:" },
                "dependencies": { "pkg-a": "workspace:~", "react": "^18.0.0" }
            }"#,
        );

        let v = versions();
        let c = catalogs();
        let resolver = Resolver::new(&v, &c);
        let projects = vec![Project::new(&pkg_b, "pkg-b").with_version("2.0.0")];

        let result = scan(&projects, &resolver);
        assert_eq!(result.scanned, 1);
        assert!(result.skipped.is_empty());

        let seen: Vec<_> = result
            .updates
            .iter()
            .map(|(pkg, u)| (pkg.as_str(), u.dependency_name.as_str(), u.to_version.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("pkg-b", "pkg-a", "~1.0.0"),
                ("pkg-b", "lodash", "4.17.21"),
                ("pkg-b", "pkg-a", "^1.0.0"),
            ]
        );
        assert_eq!(result.updates[1].1.reason, UpdateReason::Catalog);
        assert_eq!(
            result.updates[2].1.section,
            DependencySection::PeerDependencies
        );
    }

    #[test]
    fn test_scan_falls_back_to_state_name() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            dir.path(),
            r#"{ "dependencies": { "pkg-a": "workspace:*" } }"#,
        );

        let v = versions();
        let c = catalogs();
        let resolver = Resolver::new(&v, &c);
        let projects = vec![Project::new(dir.path(), "from-state")];

        let result = scan(&projects, &resolver);
        assert_eq!(result.updates.len(), 1);
        assert_eq!(result.updates[0].0, "from-state");
    }

    #[test]
    fn test_scan_prefers_manifest_name() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            dir.path(),
            r#"{ "name": "from-manifest", "dependencies": { "pkg-a": "workspace:*" } }"#,
        );

        let v = versions();
        let c = catalogs();
        let resolver = Resolver::new(&v, &c);
        let projects = vec![Project::new(dir.path(), "from-state")];

        let result = scan(&projects, &resolver);
        assert_eq!(result.updates[0].0, "from-manifest");
    }

    #[test]
    fn test_scan_skips_missing_and_malformed_manifests() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let broken = dir.path().join("broken");
        let good = dir.path().join("good");
        write_manifest(&broken, "{ not json");
        write_manifest(
            &good,
            r#"{ "name": "good", "dependencies": { "pkg-a": "workspace:*" } }"#,
        );

        let v = versions();
        let c = catalogs();
        let resolver = Resolver::new(&v, &c);
        let projects = vec![
            Project::new(&broken, "broken"),
            Project::new(&good, "good"),
            Project::new(&missing, "missing"),
        ];

        let result = scan(&projects, &resolver);
        assert_eq!(result.scanned, 1);
        assert_eq!(result.updates.len(), 1);
        assert_eq!(result.skipped.len(), 2);
        assert!(matches!(
            result.skipped[0].reason,
            SkipReason::MalformedManifest(_)
        ));
        assert_eq!(result.skipped[1].reason, SkipReason::MissingManifest);
    }

    #[test]
    fn test_scan_ignores_unresolvable_entries() {
        let dir = TempDir::new().unwrap();
        write_manifest(
            dir.path(),
            r#"{
                "name": "x",
                "dependencies": {
                    "external": "workspace:*",
                    "vue": "catalog:",
                    "local": "file:../local",
                    "numeric": 5
                }
            }"#,
        );

        let v = versions();
        let c = catalogs();
        let resolver = Resolver::new(&v, &c);
        let projects = vec![Project::new(dir.path(), "x")];

        let result = scan(&projects, &resolver);
        assert_eq!(result.scanned, 1);
        assert!(result.updates.is_empty());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::MissingManifest.to_string(), "no package.json");
        assert!(SkipReason::MalformedManifest("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
