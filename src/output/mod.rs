//! Output assembly and reporting
//!
//! This module provides:
//! - Collapsing resolved updates into the dependency map
//! - Compact serialization with the action output size ceiling
//! - GitHub Actions output records and log groups
//! - Human-readable summaries for the terminal

mod github;
mod text;

pub use github::{format_error, format_output, is_github_actions, ActionOutput, LogGroup};
pub use text::TextReporter;

use crate::domain::{ResolvedUpdate, UpdateMap};
use crate::error::OutputError;
use log::debug;

/// Maximum size of a single GitHub Action output, in UTF-16 code units
pub const MAX_OUTPUT_LEN: usize = 65_536;

/// The dependency map together with its serialized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledOutput {
    /// Package name -> dependency name -> version
    pub map: UpdateMap,
    /// Compact JSON of `map`
    pub serialized: String,
}

/// Collapse `(package, update)` pairs into a dependency map.
///
/// A dependency resolved twice for the same package keeps its first position
/// and takes the later version.
pub fn collapse<'a, I>(updates: I) -> UpdateMap
where
    I: IntoIterator<Item = &'a (String, ResolvedUpdate)>,
{
    let mut map = UpdateMap::new();

    for (package, update) in updates {
        let deps = map.entry(package.clone()).or_default();
        if let Some(previous) = deps.insert(
            update.dependency_name.clone(),
            update.to_version.clone(),
        ) {
            if previous != update.to_version {
                debug!(
                    "{}: {} from {} overrides {} with {}",
                    package, update.dependency_name, update.section, previous, update.to_version
                );
            }
        }
    }

    map
}

/// Serialize the map as compact JSON, rejecting anything over [`MAX_OUTPUT_LEN`]
pub fn serialize_update_map(map: &UpdateMap) -> Result<String, OutputError> {
    let serialized = serde_json::to_string(map).map_err(|e| OutputError::SerializeError {
        message: e.to_string(),
    })?;

    // UTF-16 code units, so astral characters count twice
    let length = serialized.encode_utf16().count();
    if length > MAX_OUTPUT_LEN {
        return Err(OutputError::too_large(length, MAX_OUTPUT_LEN));
    }

    Ok(serialized)
}

/// Collapse and serialize in one step
pub fn assemble<'a, I>(updates: I) -> Result<AssembledOutput, OutputError>
where
    I: IntoIterator<Item = &'a (String, ResolvedUpdate)>,
{
    let map = collapse(updates);
    let serialized = serialize_update_map(&map)?;
    Ok(AssembledOutput { map, serialized })
}
