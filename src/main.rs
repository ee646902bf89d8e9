//! pnpm-deps - pnpm workspace dependency tooling for CI
//!
//! Subcommands:
//! - resolve: turn workspace: and catalog: specifiers into a dependency map
//! - replace: apply that map to a package.json
//! - detect: find the packages whose files changed between two revisions

use clap::Parser;
use log::info;
use pnpm_deps::cli::{Cli, Command, DetectArgs, ReplaceArgs, ResolveArgs};
use pnpm_deps::detect::{detect_changes, SystemGit};
use pnpm_deps::manifest::{parse_dep_map, ManifestWriter};
use pnpm_deps::orchestrator::Orchestrator;
use pnpm_deps::output::{format_error, is_github_actions, ActionOutput, LogGroup, TextReporter};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            if is_github_actions() {
                eprintln!("{}", format_error(&e.to_string()));
            }
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr at the level implied by the flags unless RUST_LOG is set
fn init_logging(cli: &Cli) {
    let default_level = cli.log_level().to_string().to_lowercase();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Main application logic
fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let outputs = ActionOutput::new(cli.github_output.clone());
    let reporter = TextReporter::new(io::stderr().is_terminal());
    let mut report: Box<dyn Write> = if cli.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    };

    match &cli.command {
        Command::Resolve(args) => resolve(args, &outputs, &reporter, &mut report)?,
        Command::Replace(args) => replace(args, &outputs, &reporter, &mut report)?,
        Command::Detect(args) => detect(args, &outputs, &reporter, &mut report)?,
    }

    report.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn resolve(
    args: &ResolveArgs,
    outputs: &ActionOutput,
    reporter: &TextReporter,
    report: &mut dyn Write,
) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(args.options());
    info!("reading workspace state from {}", orchestrator.state_path().display());

    let outcome = orchestrator.run()?;
    reporter.report_resolve(&outcome, report)?;

    outputs.set_output("dep-map", &outcome.serialized)?;
    println!("{}", outcome.serialized);
    Ok(())
}

fn replace(
    args: &ReplaceArgs,
    outputs: &ActionOutput,
    reporter: &TextReporter,
    report: &mut dyn Write,
) -> anyhow::Result<()> {
    info!("configuration: package-path={}", args.package_path.display());

    let dep_map = parse_dep_map(&args.dep_map)?;
    let result = ManifestWriter::new(args.dry_run).apply(&dep_map, &args.package_path)?;

    {
        let _group = LogGroup::start("Dependency changes");
        reporter.report_replace(&result, args.dry_run, report)?;
    }

    let changes = serde_json::to_string(&result.changes)?;
    outputs.set_output("updated", &result.updated().to_string())?;
    outputs.set_output("changes", &changes)?;
    println!("{}", changes);
    Ok(())
}

fn detect(
    args: &DetectArgs,
    outputs: &ActionOutput,
    reporter: &TextReporter,
    report: &mut dyn Write,
) -> anyhow::Result<()> {
    let input = args.input();
    info!(
        "configuration: config-file={}, base-ref={}, head-ref={}",
        input.config_file.display(),
        input.base_ref,
        input.head_ref
    );

    let result = detect_changes(&input, &SystemGit::new())?;

    {
        let _group = LogGroup::start("Changed files");
        reporter.report_changed_files(&result, report)?;
    }
    reporter.report_matrix(&result, report)?;

    let matrix = serde_json::to_string(&result.matrix)?;
    outputs.set_output("matrix", &matrix)?;
    outputs.set_output("has-changes", &result.has_changes.to_string())?;
    outputs.set_output("changed-files", &result.changed_files.join("\n"))?;
    println!("{}", matrix);
    Ok(())
}
