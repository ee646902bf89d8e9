//! End-to-end tests for the pnpm-deps CLI
//!
//! These tests verify:
//! - stdout carries only the JSON result of each subcommand
//! - Step outputs are appended to the GITHUB_OUTPUT file
//! - Dry-run mode leaves files unchanged
//! - Exit codes are correct for various scenarios

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a command isolated from any GitHub Actions environment
fn pnpm_deps() -> Command {
    let mut cmd = Command::cargo_bin("pnpm-deps").unwrap();
    for var in [
        "GITHUB_OUTPUT",
        "GITHUB_ACTIONS",
        "RUST_LOG",
        "INPUT_INCLUDE",
        "INPUT_EXCLUDE",
        "INPUT_DEP-MAP",
        "INPUT_PACKAGE-PATH",
        "INPUT_CONFIG-FILE",
        "INPUT_BASE-REF",
        "INPUT_HEAD-REF",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Create a two-package workspace: `pkgB` depends on `pkgA` and the default catalog
fn create_workspace() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let root = temp_dir.path();

    let mut projects = serde_json::Map::new();
    projects.insert(
        root.join("packages/a").to_string_lossy().into_owned(),
        serde_json::json!({ "name": "pkgA", "version": "1.0.0" }),
    );
    projects.insert(
        root.join("packages/b").to_string_lossy().into_owned(),
        serde_json::json!({ "name": "pkgB", "version": "2.0.0" }),
    );
    let state = serde_json::json!({
        "projects": projects,
        "settings": { "catalogs": { "default": { "lodash": "4.17.21" } } }
    });
    fs::create_dir_all(root.join("node_modules")).unwrap();
    fs::write(
        root.join("node_modules/.pnpm-workspace-state-v1.json"),
        state.to_string(),
    )
    .unwrap();

    fs::create_dir_all(root.join("packages/a")).unwrap();
    fs::write(
        root.join("packages/a/package.json"),
        r#"{ "name": "pkgA", "version": "1.0.0" }"#,
    )
    .unwrap();

    fs::create_dir_all(root.join("packages/b")).unwrap();
    fs::write(
        root.join("packages/b/package.json"),
        r#"{
  "name": "pkgB",
  "version": "2.0.0",
  "dependencies": {
    "pkgA": "workspace:^"
  },
  "devDependencies": {
    "lodash": "catalog:"
  }
}
"#,
    )
    .unwrap();

    temp_dir
}

fn read_outputs(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

mod resolve_tests {
    use super::*;

    #[test]
    fn test_resolve_prints_dep_map() {
        let workspace = create_workspace();

        pnpm_deps()
            .args(["resolve"])
            .arg(workspace.path())
            .assert()
            .success()
            .stdout(r#"{"pkgB":{"pkgA":"^1.0.0","lodash":"4.17.21"}}"#.to_string() + "\n");
    }

    #[test]
    fn test_resolve_sets_github_output() {
        let workspace = create_workspace();
        let output_file = workspace.path().join("github_output");

        pnpm_deps()
            .arg("resolve")
            .arg(workspace.path())
            .env("GITHUB_OUTPUT", &output_file)
            .assert()
            .success();

        assert_eq!(
            read_outputs(&output_file),
            "dep-map<<EOF\n{\"pkgB\":{\"pkgA\":\"^1.0.0\",\"lodash\":\"4.17.21\"}}\nEOF\n"
        );
    }

    #[test]
    fn test_resolve_exclude_from_env() {
        let workspace = create_workspace();

        pnpm_deps()
            .arg("resolve")
            .arg(workspace.path())
            .env("INPUT_EXCLUDE", "pkgB")
            .assert()
            .success()
            .stdout("{}\n");
    }

    #[test]
    fn test_resolve_missing_state_file() {
        let temp_dir = tempfile::tempdir().unwrap();

        pnpm_deps()
            .arg("resolve")
            .arg(temp_dir.path())
            .assert()
            .failure()
            .code(1)
            .stdout("")
            .stderr(predicate::str::contains("workspace state file not found"));
    }

    #[test]
    fn test_error_annotation_under_github_actions() {
        let temp_dir = tempfile::tempdir().unwrap();

        pnpm_deps()
            .arg("resolve")
            .arg(temp_dir.path())
            .env("GITHUB_ACTIONS", "true")
            .assert()
            .failure()
            .stderr(predicate::str::contains("::error::workspace state file not found"));
    }

    #[test]
    fn test_resolve_unwritable_github_output_prints_nothing() {
        let workspace = create_workspace();

        // A directory cannot be opened for appending
        pnpm_deps()
            .arg("resolve")
            .arg(workspace.path())
            .env("GITHUB_OUTPUT", workspace.path())
            .assert()
            .failure()
            .code(1)
            .stdout("")
            .stderr(predicate::str::contains("failed to write action output"));
    }

    #[test]
    fn test_resolve_quiet_mode() {
        let workspace = create_workspace();

        pnpm_deps()
            .args(["-q", "resolve"])
            .arg(workspace.path())
            .assert()
            .success()
            .stderr("");
    }
}

mod replace_tests {
    use super::*;

    const DEP_MAP: &str = r#"{"pkgB":{"pkgA":"^1.0.0","lodash":"4.17.21"}}"#;

    #[test]
    fn test_replace_rewrites_manifest() {
        let workspace = create_workspace();
        let manifest = workspace.path().join("packages/b/package.json");
        let output_file = workspace.path().join("github_output");

        pnpm_deps()
            .args(["replace", "--dep-map", DEP_MAP, "--package-path"])
            .arg(&manifest)
            .env("GITHUB_OUTPUT", &output_file)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"{"dependency":"pkgA","section":"dependencies","oldVersion":"workspace:^","newVersion":"^1.0.0"}"#,
            ));

        let content = fs::read_to_string(&manifest).unwrap();
        assert!(content.contains("\"pkgA\": \"^1.0.0\""));
        assert!(content.contains("\"lodash\": \"4.17.21\""));
        assert!(content.ends_with("}\n"));

        let outputs = read_outputs(&output_file);
        assert!(outputs.starts_with("updated<<EOF\ntrue\nEOF\nchanges<<EOF\n["));
    }

    #[test]
    fn test_replace_dry_run_leaves_file_unchanged() {
        let workspace = create_workspace();
        let manifest = workspace.path().join("packages/b/package.json");
        let before = fs::read_to_string(&manifest).unwrap();

        pnpm_deps()
            .args(["replace", "-n", "--package-path"])
            .arg(&manifest)
            .env("INPUT_DEP-MAP", DEP_MAP)
            .assert()
            .success()
            .stderr(predicate::str::contains("(dry-run)"));

        assert_eq!(fs::read_to_string(&manifest).unwrap(), before);
    }

    #[test]
    fn test_replace_package_not_in_map() {
        let workspace = create_workspace();
        let manifest = workspace.path().join("packages/a/package.json");

        pnpm_deps()
            .args(["replace", "--dep-map", DEP_MAP, "--package-path"])
            .arg(&manifest)
            .assert()
            .success()
            .stdout("[]\n");
    }

    #[test]
    fn test_replace_invalid_dep_map() {
        let workspace = create_workspace();

        pnpm_deps()
            .args(["replace", "--dep-map", "not json", "--package-path"])
            .arg(workspace.path().join("packages/b/package.json"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("failed to parse dep-map input as JSON"));
    }

    #[test]
    fn test_replace_missing_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();

        pnpm_deps()
            .args(["replace", "--dep-map", "{}"])
            .current_dir(temp_dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("package.json not found at"));
    }

    #[test]
    fn test_replace_requires_dep_map() {
        pnpm_deps().arg("replace").assert().failure().code(2);
    }
}

mod detect_tests {
    use super::*;

    #[test]
    fn test_detect_missing_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();

        pnpm_deps()
            .args(["detect", "--config-file"])
            .arg(temp_dir.path().join("packages.json"))
            .current_dir(temp_dir.path())
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn test_detect_outside_git_reports_no_changes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = temp_dir.path().join("packages.json");
        fs::write(
            &config,
            r#"{ "packages": [{ "packagePath": "packages/a", "targetRepo": "org/a" }] }"#,
        )
        .unwrap();
        let output_file = temp_dir.path().join("github_output");

        pnpm_deps()
            .args(["detect", "--config-file"])
            .arg(&config)
            .env("GITHUB_OUTPUT", &output_file)
            .env("GIT_CEILING_DIRECTORIES", temp_dir.path().parent().unwrap())
            .current_dir(temp_dir.path())
            .assert()
            .success()
            .stdout("[]\n");

        assert_eq!(
            read_outputs(&output_file),
            "matrix<<EOF\n[]\nEOF\nhas-changes<<EOF\nfalse\nEOF\nchanged-files<<EOF\n\nEOF\n"
        );
    }
}

mod exit_code_tests {
    use super::*;

    #[test]
    fn test_exit_code_help() {
        pnpm_deps()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("resolve"));
    }

    #[test]
    fn test_exit_code_version() {
        pnpm_deps()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_exit_code_no_subcommand() {
        pnpm_deps().assert().failure();
    }
}
