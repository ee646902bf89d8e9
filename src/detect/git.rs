//! Git queries used by the change detector

use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Trait for the git operations the detector needs
pub trait GitRunner {
    /// Returns true if `rev` names an object in the repository
    fn object_exists(&self, rev: &str) -> bool;

    /// Files changed between `base` and `head`, or `None` if git failed.
    ///
    /// An empty `head` compares against the working tree.
    fn changed_files(&self, base: &str, head: &str) -> Option<Vec<String>>;
}

/// Runs the `git` executable
#[derive(Debug, Default)]
pub struct SystemGit {
    /// Working directory for git commands (current directory when `None`)
    working_dir: Option<PathBuf>,
}

impl SystemGit {
    /// Create a runner for the current directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner for the repository at `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    /// Run a git command and capture output
    fn run(&self, args: &[&str]) -> std::io::Result<Output> {
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command.output()
    }
}

impl GitRunner for SystemGit {
    fn object_exists(&self, rev: &str) -> bool {
        self.run(&["cat-file", "-e", rev])
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn changed_files(&self, base: &str, head: &str) -> Option<Vec<String>> {
        let mut args = vec!["diff", "--name-only", base];
        if !head.is_empty() {
            args.push(head);
        }
        debug!("running git {}", args.join(" "));

        let output = self.run(&args).ok()?;
        if !output.status.success() {
            debug!(
                "git diff failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        Some(parse_name_only(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Split `git diff --name-only` output into paths, dropping blank lines
pub fn parse_name_only(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
