//! Project index built from the workspace state
//!
//! Holds two views of the workspace:
//! - the filtered, path-ordered projects to scan
//! - a name -> version lookup over *all* projects, so a `workspace:` dependency
//!   on a filtered-out project still resolves

use super::{ProjectFilter, WorkspaceState};
use crate::domain::Project;
use log::debug;
use std::collections::HashMap;

/// Indexed view of the workspace projects
#[derive(Debug, Clone, Default)]
pub struct ProjectIndex {
    /// Projects that passed the filter, ordered by path
    projects: Vec<Project>,
    /// Name -> version for every versioned project
    versions: HashMap<String, String>,
    /// Number of projects before filtering
    total: usize,
}

impl ProjectIndex {
    /// Build the index from a state snapshot
    pub fn build(state: &WorkspaceState, filter: &ProjectFilter) -> Self {
        let mut projects: Vec<Project> = state
            .projects
            .iter()
            .map(|(path, meta)| Project {
                path: path.into(),
                name: meta.name.clone(),
                version: meta.version.clone(),
            })
            .collect();
        projects.sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));

        // Later projects win on duplicate names
        let mut versions = HashMap::new();
        for project in &projects {
            if let Some(version) = project.version.as_deref().filter(|v| !v.is_empty()) {
                versions.insert(project.name.clone(), version.to_string());
            }
        }

        let total = projects.len();
        projects.retain(|project| {
            let keep = filter.allows(&project.name);
            if !keep {
                debug!("filtered out project {}", project);
            }
            keep
        });

        Self {
            projects,
            versions,
            total,
        }
    }

    /// Projects to scan, in path order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Name -> version lookup over the unfiltered workspace
    pub fn versions(&self) -> &HashMap<String, String> {
        &self.versions
    }

    /// Number of projects in the workspace before filtering
    pub fn total_projects(&self) -> usize {
        self.total
    }
}
