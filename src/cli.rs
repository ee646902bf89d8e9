//! CLI argument parsing module for pnpm-deps
//!
//! Every action input can be passed as a flag or through the `INPUT_<NAME>`
//! variable GitHub Actions sets for it.

use crate::detect::DetectInput;
use crate::orchestrator::ResolveOptions;
use crate::workspace::ProjectFilter;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// pnpm workspace dependency tooling for CI
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pnpm-deps",
    version,
    about = "Resolve pnpm workspace: and catalog: specifiers for monorepo CI"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - warnings and errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// File to append step outputs to
    #[arg(long, global = true, env = "GITHUB_OUTPUT", value_name = "PATH")]
    pub github_output: Option<PathBuf>,
}

impl Cli {
    /// Log level implied by --verbose / --quiet
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve workspace: and catalog: specifiers into a dependency map
    Resolve(ResolveArgs),
    /// Apply a dependency map to a package.json
    Replace(ReplaceArgs),
    /// Detect which configured packages changed between two revisions
    Detect(DetectArgs),
}

/// Arguments for `resolve`
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Workspace root (default: current directory)
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Workspace state file (default: <ROOT>/node_modules/.pnpm-workspace-state-v1.json)
    #[arg(long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Only scan these projects (comma-separated names)
    #[arg(long, env = "INPUT_INCLUDE", value_name = "LIST")]
    pub include: Option<String>,

    /// Never scan these projects (comma-separated names)
    #[arg(long, env = "INPUT_EXCLUDE", value_name = "LIST")]
    pub exclude: Option<String>,
}

impl ResolveArgs {
    /// Project filter from --include / --exclude
    pub fn filter(&self) -> ProjectFilter {
        ProjectFilter::from_inputs(self.include.as_deref(), self.exclude.as_deref())
    }

    /// Options for the resolve orchestrator
    pub fn options(&self) -> ResolveOptions {
        let options = ResolveOptions::new(&self.root).with_filter(self.filter());
        match &self.state_file {
            Some(state_file) => options.with_state_file(state_file),
            None => options,
        }
    }
}

/// Arguments for `replace`
#[derive(Args, Debug, Clone)]
pub struct ReplaceArgs {
    /// Dependency map JSON produced by `resolve`
    #[arg(long, env = "INPUT_DEP-MAP", value_name = "JSON")]
    pub dep_map: String,

    /// package.json to rewrite
    #[arg(
        long,
        env = "INPUT_PACKAGE-PATH",
        value_name = "PATH",
        default_value = "package.json"
    )]
    pub package_path: PathBuf,

    /// Dry run mode - show what would be rewritten without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Arguments for `detect`
#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    /// JSON file listing the packages to watch
    #[arg(long, env = "INPUT_CONFIG-FILE", value_name = "PATH")]
    pub config_file: PathBuf,

    /// Revision to compare from (falls back to HEAD~1)
    #[arg(long, env = "INPUT_BASE-REF", value_name = "REV")]
    pub base_ref: Option<String>,

    /// Revision to compare to
    #[arg(long, env = "INPUT_HEAD-REF", value_name = "REV", default_value = "HEAD")]
    pub head_ref: String,
}

impl DetectArgs {
    /// Input for the change detector
    pub fn input(&self) -> DetectInput {
        DetectInput {
            config_file: self.config_file.clone(),
            base_ref: self.base_ref.clone().unwrap_or_default(),
            head_ref: self.head_ref.clone(),
        }
    }
}
