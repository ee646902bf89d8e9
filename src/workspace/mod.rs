//! pnpm workspace model
//!
//! This module provides functionality to:
//! - Read the workspace state snapshot written by `pnpm install`
//! - Filter projects by name
//! - Index projects for `workspace:` resolution

mod filter;
mod index;
mod state;

pub use filter::{parse_name_list, ProjectFilter};
pub use index::ProjectIndex;
pub use state::{
    Catalog, Catalogs, ProjectMeta, WorkspaceSettings, WorkspaceState, STATE_DIR, STATE_FILENAME,
};
