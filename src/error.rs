//! Application error types using thiserror
//!
//! Error hierarchy:
//! - WorkspaceError: The pnpm workspace state snapshot is missing or malformed
//! - ManifestError: Issues reading or writing a package.json
//! - OutputError: The resolved dependency map could not be emitted
//! - ConfigError: Invalid action inputs or config files

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Workspace state related errors
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Output related errors
    #[error(transparent)]
    Output(#[from] OutputError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to the pnpm workspace state file
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// State file not found (usually means `pnpm install` has not run)
    #[error("workspace state file not found: {path} (run `pnpm install` first)")]
    StateNotFound { path: PathBuf },

    /// Failed to read state file
    #[error("failed to read workspace state file {path}: {source}")]
    StateReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// State file is not valid JSON or has the wrong shape
    #[error("failed to parse workspace state in {path}: {message}")]
    StateParseError { path: PathBuf, message: String },
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("package.json not found at: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },
}

/// Errors related to emitting results
#[derive(Error, Debug)]
pub enum OutputError {
    /// Serialized map exceeds the action output ceiling
    #[error("output too large for a GitHub Action output ({length} UTF-16 code units, limit is {limit})")]
    TooLarge { length: usize, limit: usize },

    /// Serialization failure
    #[error("failed to serialize output: {message}")]
    SerializeError { message: String },

    /// Failed to append to the GITHUB_OUTPUT file
    #[error("failed to write action output to {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration and action inputs
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("config file {path} not found")]
    NotFound { path: PathBuf },

    /// Config file is unreadable or not valid JSON
    #[error("invalid JSON in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    /// The dep-map input is not a valid dependency map
    #[error("failed to parse dep-map input as JSON: {message}")]
    InvalidDepMap { message: String },
}

impl WorkspaceError {
    /// Creates a new StateNotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        WorkspaceError::StateNotFound { path: path.into() }
    }

    /// Creates a new StateReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorkspaceError::StateReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new StateParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        WorkspaceError::StateParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl OutputError {
    /// Creates a new TooLarge error
    pub fn too_large(length: usize, limit: usize) -> Self {
        OutputError::TooLarge { length, limit }
    }
}

impl ConfigError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::NotFound { path: path.into() }
    }

    /// Creates a new InvalidJson error
    pub fn invalid_json(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::InvalidJson {
            path: path.into(),
            message: message.into(),
        }
    }
}
