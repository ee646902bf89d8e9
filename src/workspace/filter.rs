//! Project include/exclude filter
//!
//! A project is scanned iff it passes both lists: include (when given) must
//! contain its name, and exclude (when given) must not.

/// Filter configuration for which projects get scanned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// If set, only these projects are scanned
    pub include: Option<Vec<String>>,
    /// If set, these projects are never scanned
    pub exclude: Option<Vec<String>>,
}

impl ProjectFilter {
    /// Create a new filter that lets every project through
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from comma-separated action inputs
    pub fn from_inputs(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include: include.and_then(parse_name_list),
            exclude: exclude.and_then(parse_name_list),
        }
    }

    /// Set projects to include
    pub fn with_include(mut self, include: Vec<String>) -> Self {
        self.include = Some(include);
        self
    }

    /// Set projects to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = Some(exclude);
        self
    }

    /// Check if a project should be scanned
    pub fn allows(&self, name: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.iter().any(|p| p == name) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.iter().any(|p| p == name) {
                return false;
            }
        }
        true
    }

    /// Returns true if neither list is set
    pub fn is_unrestricted(&self) -> bool {
        self.include.is_none() && self.exclude.is_none()
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
///
/// Returns `None` when nothing is left, so an empty action input means "no
/// restriction" rather than "match nothing".
pub fn parse_name_list(value: &str) -> Option<Vec<String>> {
    let names: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}
