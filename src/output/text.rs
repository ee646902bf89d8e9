//! Text output for human-readable display
//!
//! This module provides:
//! - Resolve summary with skipped projects
//! - Rewritten dependencies of a replace run
//! - Changed files and detected packages of a detect run

use crate::detect::DetectOutput;
use crate::manifest::ReplaceResult;
use crate::orchestrator::ResolveOutcome;
use colored::Colorize;
use std::io::Write;

/// Human-readable reporter
pub struct TextReporter {
    /// Whether to use colors
    color: bool,
}

impl TextReporter {
    /// Create a new reporter
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn count(n: usize, singular: &str, plural: &str) -> String {
        format!("{} {}", n, if n == 1 { singular } else { plural })
    }

    /// Summary of a resolve run
    pub fn report_resolve(
        &self,
        outcome: &ResolveOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let updates: usize = outcome.map.values().map(|deps| deps.len()).sum();
        let headline = format!(
            "Resolved {} in {}",
            Self::count(updates, "dependency", "dependencies"),
            Self::count(outcome.map.len(), "package", "packages")
        );
        let scanned = format!(
            "(scanned {} of {} projects)",
            outcome.projects_scanned, outcome.projects_total
        );

        if self.color {
            writeln!(writer, "{} {}", headline.bold(), scanned.dimmed())?;
        } else {
            writeln!(writer, "{} {}", headline, scanned)?;
        }

        for skipped in &outcome.skipped {
            if self.color {
                writeln!(
                    writer,
                    "  {} {}",
                    skipped.project.name.dimmed(),
                    format!("({})", skipped.reason).yellow()
                )?;
            } else {
                writeln!(writer, "  {} ({})", skipped.project.name, skipped.reason)?;
            }
        }

        Ok(())
    }

    /// Rewritten dependencies of a replace run
    pub fn report_replace(
        &self,
        result: &ReplaceResult,
        dry_run: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let prefix = match (dry_run, self.color) {
            (true, true) => format!("{} ", "(dry-run)".cyan()),
            (true, false) => "(dry-run) ".to_string(),
            (false, _) => String::new(),
        };
        let path_display = result.path.display().to_string();

        if !result.updated() {
            writeln!(writer, "{}{}: no dependencies to update", prefix, path_display)?;
            return Ok(());
        }

        let count = Self::count(result.changes.len(), "update", "updates");
        if self.color {
            writeln!(writer, "{}{}: {}", prefix, path_display.bold(), count.green())?;
        } else {
            writeln!(writer, "{}{}: {}", prefix, path_display, count)?;
        }

        let width = result
            .changes
            .iter()
            .map(|c| c.dependency.len())
            .max()
            .unwrap_or(0);
        for change in &result.changes {
            if self.color {
                writeln!(
                    writer,
                    "  {:width$} {} {} {} {}",
                    change.dependency,
                    change.old_version.dimmed(),
                    "→".dimmed(),
                    change.new_version.bright_white().bold(),
                    format!("({})", change.section).dimmed(),
                    width = width
                )?;
            } else {
                writeln!(
                    writer,
                    "  {:width$} {} -> {} ({})",
                    change.dependency,
                    change.old_version,
                    change.new_version,
                    change.section,
                    width = width
                )?;
            }
        }

        Ok(())
    }

    /// Every changed file, one per line
    pub fn report_changed_files(
        &self,
        output: &DetectOutput,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if output.changed_files.is_empty() {
            return writeln!(writer, "No changed files detected");
        }
        for file in &output.changed_files {
            writeln!(writer, "{}", file)?;
        }
        Ok(())
    }

    /// Packages selected for the matrix
    pub fn report_matrix(
        &self,
        output: &DetectOutput,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if !output.has_changes {
            return writeln!(writer, "No package changes detected");
        }

        let headline = format!("Will sync {}", Self::count(output.matrix.len(), "package", "packages"));
        if self.color {
            writeln!(writer, "{}", headline.green().bold())?;
        } else {
            writeln!(writer, "{}", headline)?;
        }

        for pkg in &output.matrix {
            let repo = pkg.target_repo().unwrap_or_default();
            let path = pkg.package_path().unwrap_or_default();
            if self.color {
                writeln!(writer, "  {} {}", repo.bold(), format!("({})", path).dimmed())?;
            } else {
                writeln!(writer, "  {} ({})", repo, path)?;
            }
        }

        Ok(())
    }
}
