//! pnpm workspace state reader
//!
//! `pnpm install` writes `node_modules/.pnpm-workspace-state-v1.json`, a
//! snapshot of every workspace project plus the resolved pnpm settings:
//!
//! ```json
//! {
//!   "projects": { "/repo/packages/a": { "name": "a", "version": "1.0.0" } },
//!   "settings": { "catalogs": { "default": { "react": "^18.3.1" } } }
//! }
//! ```
//!
//! Only the fields used for resolution are read; everything else is ignored.
//! Catalog entries and versions that are not strings are dropped rather than
//! failing the whole snapshot.

use crate::error::WorkspaceError;
use indexmap::map::Entry;
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory pnpm writes the state file into, relative to the workspace root
pub const STATE_DIR: &str = "node_modules";

/// File name of the state snapshot
pub const STATE_FILENAME: &str = ".pnpm-workspace-state-v1.json";

/// A single catalog: dependency name -> version
pub type Catalog = HashMap<String, String>;

/// All catalogs by name
pub type Catalogs = HashMap<String, Catalog>;

/// Project entry as recorded by pnpm
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMeta {
    /// Package name
    #[serde(default)]
    pub name: String,
    /// Package version (private packages often have none)
    #[serde(default, deserialize_with = "string_or_none")]
    pub version: Option<String>,
}

/// The subset of pnpm settings we need
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    /// Named version catalogs
    #[serde(default, deserialize_with = "string_catalogs")]
    pub catalogs: Catalogs,
}

/// Snapshot of the workspace for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceState {
    /// Project directory -> project entry, in file order
    pub projects: IndexMap<String, ProjectMeta>,
    /// pnpm settings
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: WorkspaceSettings,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn string_catalogs<'de, D>(deserializer: D) -> Result<Catalogs, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: HashMap<String, Value> = null_as_default(deserializer)?;
    let catalogs: Catalogs = raw
        .into_iter()
        .filter_map(|(name, entries)| {
            let Value::Object(entries) = entries else {
                debug!("ignoring catalog {}: not an object", name);
                return None;
            };
            let catalog: Catalog = entries
                .into_iter()
                .filter_map(|(dep, version)| match version {
                    Value::String(version) => Some((dep, version)),
                    other => {
                        debug!("ignoring catalog {} entry {}: {}", name, dep, other);
                        None
                    }
                })
                .collect();
            Some((name, catalog))
        })
        .collect();
    Ok(catalogs)
}

impl WorkspaceState {
    /// Default location of the state file for a workspace root
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(STATE_DIR).join(STATE_FILENAME)
    }

    /// Parse a state snapshot from JSON text
    pub fn parse(content: &str, path: &Path) -> Result<Self, WorkspaceError> {
        serde_json::from_str(content).map_err(|e| WorkspaceError::parse_error(path, e.to_string()))
    }

    /// Read and parse the state file at `path`
    pub fn load(path: &Path) -> Result<Self, WorkspaceError> {
        if !path.exists() {
            return Err(WorkspaceError::not_found(path));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| WorkspaceError::read_error(path, e))?;
        let state = Self::parse(&content, path)?;

        debug!(
            "loaded workspace state from {}: {} projects, {} catalogs",
            path.display(),
            state.projects.len(),
            state.settings.catalogs.len()
        );

        Ok(state)
    }

    /// Resolve relative project paths against `root`
    ///
    /// pnpm records absolute paths; hand-written or relocated snapshots may not.
    /// When a relative and an absolute key name the same directory, the first
    /// one in the file is kept.
    pub fn anchored_at(mut self, root: &Path) -> Self {
        let mut anchored = IndexMap::with_capacity(self.projects.len());
        for (path, meta) in self.projects {
            let path = if Path::new(&path).is_relative() {
                root.join(&path).to_string_lossy().into_owned()
            } else {
                path
            };
            match anchored.entry(path) {
                Entry::Vacant(slot) => {
                    slot.insert(meta);
                }
                Entry::Occupied(slot) => {
                    warn!(
                        "duplicate workspace project {}: keeping {}, ignoring {}",
                        slot.key(),
                        slot.get().name,
                        meta.name
                    );
                }
            }
        }
        self.projects = anchored;
        self
    }

    /// The named catalogs
    pub fn catalogs(&self) -> &Catalogs {
        &self.settings.catalogs
    }
}
