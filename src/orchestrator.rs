//! Resolve orchestrator for coordinating one resolution run
//!
//! This module provides:
//! - Workflow coordination: load state → index → scan → assemble
//! - Include/exclude filter application
//! - Skipped-project reporting without failing the run

use crate::domain::UpdateMap;
use crate::error::AppError;
use crate::output::assemble;
use crate::resolve::{scan, Resolver, SkippedProject};
use crate::workspace::{ProjectFilter, ProjectIndex, WorkspaceState};
use log::{debug, info, warn};
use std::path::PathBuf;

/// Options for one resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Workspace root
    pub root: PathBuf,
    /// State file override (defaults to the one under `root`)
    pub state_file: Option<PathBuf>,
    /// Project filter
    pub filter: ProjectFilter,
}

impl ResolveOptions {
    /// Options for the workspace at `root` with no filter
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Use a specific state file
    pub fn with_state_file(mut self, state_file: impl Into<PathBuf>) -> Self {
        self.state_file = Some(state_file.into());
        self
    }

    /// Set the project filter
    pub fn with_filter(mut self, filter: ProjectFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Result of a resolution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOutcome {
    /// Package name -> dependency name -> version
    pub map: UpdateMap,
    /// Compact JSON of `map`
    pub serialized: String,
    /// Projects in the workspace before filtering
    pub projects_total: usize,
    /// Manifests that were scanned
    pub projects_scanned: usize,
    /// Projects skipped for a missing or broken manifest
    pub skipped: Vec<SkippedProject>,
}

/// Orchestrator for the resolve workflow
pub struct Orchestrator {
    options: ResolveOptions,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    /// Path of the state file this run reads
    pub fn state_path(&self) -> PathBuf {
        self.options
            .state_file
            .clone()
            .unwrap_or_else(|| WorkspaceState::default_path(&self.options.root))
    }

    /// Run the resolve workflow
    pub fn run(&self) -> Result<ResolveOutcome, AppError> {
        // Step 1: Load the workspace snapshot
        let state = WorkspaceState::load(&self.state_path())?.anchored_at(&self.options.root);

        // Step 2: Index and filter projects
        if !self.options.filter.is_unrestricted() {
            debug!(
                "project filter: include={:?} exclude={:?}",
                self.options.filter.include, self.options.filter.exclude
            );
        }
        let index = ProjectIndex::build(&state, &self.options.filter);
        info!(
            "{} of {} workspace projects selected",
            index.projects().len(),
            index.total_projects()
        );

        // Step 3: Scan manifests
        let resolver = Resolver::new(index.versions(), state.catalogs());
        let scanned = scan(index.projects(), &resolver);
        for skipped in &scanned.skipped {
            warn!("skipped {}: {}", skipped.project, skipped.reason);
        }

        // Step 4: Collapse and size-check
        let assembled = assemble(&scanned.updates)?;
        info!(
            "resolved {} dependencies across {} packages",
            scanned.updates.len(),
            assembled.map.len()
        );

        Ok(ResolveOutcome {
            map: assembled.map,
            serialized: assembled.serialized,
            projects_total: index.total_projects(),
            projects_scanned: scanned.scanned,
            skipped: scanned.skipped,
        })
    }
}
