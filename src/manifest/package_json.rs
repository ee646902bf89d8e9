//! package.json reader
//!
//! Handles:
//! - dependencies
//! - devDependencies
//! - peerDependencies
//! - optionalDependencies
//!
//! The document is kept as an ordered JSON object so it can be written back
//! with its original key order.

use crate::domain::DependencySection;
use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::path::Path;

/// A parsed package.json
#[derive(Debug, Clone, PartialEq)]
pub struct PackageJson {
    root: Map<String, Value>,
}

impl PackageJson {
    /// Parse package.json content; `path` is only used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

        match json {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(ManifestError::json_parse_error(
                path,
                "expected a JSON object at the top level",
            )),
        }
    }

    /// Read and parse the package.json at `path`
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::not_found(path));
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
        Self::parse(&content, path)
    }

    /// Declared package name, if it is a string
    pub fn name(&self) -> Option<&str> {
        self.root.get("name").and_then(Value::as_str)
    }

    /// A dependency section, if present and an object
    pub fn section(&self, section: DependencySection) -> Option<&Map<String, Value>> {
        self.root.get(section.key()).and_then(Value::as_object)
    }

    /// Textual `(name, specifier)` pairs of a section, in document order
    pub fn dependency_specs(
        &self,
        section: DependencySection,
    ) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.section(section)
            .into_iter()
            .flat_map(|deps| deps.iter())
            .filter_map(|(name, spec)| spec.as_str().map(|spec| (name.as_str(), spec)))
    }

    /// First section (in scan order) that declares `dependency`
    pub fn find_section(&self, dependency: &str) -> Option<DependencySection> {
        DependencySection::all()
            .iter()
            .copied()
            .find(|section| {
                self.section(*section)
                    .is_some_and(|deps| deps.contains_key(dependency))
            })
    }

    /// Replace the specifier of an existing dependency, returning the old value
    pub fn set_dependency(
        &mut self,
        section: DependencySection,
        dependency: &str,
        specifier: &str,
    ) -> Option<Value> {
        let deps = self.root.get_mut(section.key())?.as_object_mut()?;
        let slot = deps.get_mut(dependency)?;
        Some(std::mem::replace(slot, Value::String(specifier.to_string())))
    }

    /// Serialize with 2-space indentation and a trailing newline
    pub fn to_pretty_string(&self) -> Result<String, serde_json::Error> {
        let mut content = serde_json::to_string_pretty(&self.root)?;
        content.push('\n');
        Ok(content)
    }
}
