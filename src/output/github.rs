//! GitHub Actions integration
//!
//! - Step outputs appended to the `GITHUB_OUTPUT` file
//! - `::group::` log folding and `::error::` annotations

use crate::error::OutputError;
use log::{debug, info};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns true when running inside a GitHub Actions job
pub fn is_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Format one multiline output record: `name<<DELIM\nvalue\nDELIM\n`.
///
/// The delimiter never occurs inside `value`.
pub fn format_output(name: &str, value: &str) -> String {
    let mut delimiter = "EOF".to_string();
    let mut suffix = 0;
    while value.contains(&delimiter) {
        suffix += 1;
        delimiter = format!("EOF_{}", suffix);
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Format an `::error::` workflow command
pub fn format_error(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{}", escaped)
}

/// Sink for step outputs
#[derive(Debug, Clone, Default)]
pub struct ActionOutput {
    path: Option<PathBuf>,
}

impl ActionOutput {
    /// Create a sink writing to `path`, or only logging when `None`
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// The output file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Set a step output
    pub fn set_output(&self, name: &str, value: &str) -> Result<(), OutputError> {
        let Some(path) = &self.path else {
            info!("output {}: {}", name, value);
            return Ok(());
        };

        let write_error = |source: std::io::Error| OutputError::WriteError {
            path: path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(write_error)?;
        file.write_all(format_output(name, value).as_bytes())
            .map_err(write_error)?;

        debug!("set output {} ({} characters)", name, value.chars().count());
        Ok(())
    }
}

/// A collapsible log section, closed when dropped
#[derive(Debug)]
pub struct LogGroup {
    enabled: bool,
}

impl LogGroup {
    /// Open a group when running under GitHub Actions
    pub fn start(title: &str) -> Self {
        Self::start_if(is_github_actions(), title)
    }

    /// Open a group only if `enabled`
    pub fn start_if(enabled: bool, title: &str) -> Self {
        if enabled {
            eprintln!("::group::{}", title);
        }
        Self { enabled }
    }
}

impl Drop for LogGroup {
    fn drop(&mut self) {
        if self.enabled {
            eprintln!("::endgroup::");
        }
    }
}
