//! Workspace project information

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Manifest file name inside every project directory
pub const MANIFEST_FILENAME: &str = "package.json";

/// A local package in the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project directory
    pub path: PathBuf,
    /// Package name recorded by pnpm
    pub name: String,
    /// Package version, if the project declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Project {
    /// Creates a new project without a version
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            version: None,
        }
    }

    /// Sets the version (builder pattern)
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Path of this project's package.json
    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_FILENAME)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{} ({})", self.name, version, self.path.display()),
            None => write!(f, "{} ({})", self.name, self.path.display()),
        }
    }
}
