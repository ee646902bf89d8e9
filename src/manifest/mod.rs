//! package.json reading and writing
//!
//! This module provides functionality to:
//! - Parse the dependency sections of a package.json
//! - Apply a resolved dependency map back onto a package.json

mod package_json;
mod writer;

pub use package_json::PackageJson;
pub use writer::{parse_dep_map, DependencyChange, ManifestWriter, ReplaceResult};
