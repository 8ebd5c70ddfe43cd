//! CLI smoke tests for modplan.
//!
//! These tests verify that every command runs against fixture projects and
//! returns appropriate exit codes and output.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the modplan binary.
fn modplan_cmd() -> Command {
  let mut cmd = cargo_bin_cmd!("modplan");
  cmd.env_remove("MODPLAN_PROJECT").env_remove("RUST_LOG");
  cmd
}

/// Get path to a fixture file.
fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  modplan_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  modplan_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("modplan"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["plan", "check", "targets"] {
    modplan_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// Plan
// =============================================================================

#[test]
fn plan_prints_modules() {
  modplan_cmd()
    .arg("--project")
    .arg(fixture_path("project.json"))
    .args(["plan", "Demo"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Plan for Demo"))
    .stdout(predicate::str::contains("Slate"))
    .stdout(predicate::str::contains("UnrealEd").not());
}

#[test]
fn plan_json_for_editor_target() {
  let output = modplan_cmd()
    .arg("--project")
    .arg(fixture_path("project.json"))
    .args(["--format", "json", "plan", "DemoEditor", "--platform", "linux"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

  assert_eq!(plan["target"], "DemoEditor");
  assert_eq!(plan["context"]["is_editor_build"], true);
  assert_eq!(plan["context"]["platform"], "Linux");
  assert_eq!(
    plan["modules"]["Demo"]["resolved_public_deps"],
    serde_json::json!(["Core", "Engine", "UnrealEd"])
  );
  assert_eq!(
    plan["modules"]["Demo"]["resolved_private_deps"],
    serde_json::json!(["Slate"])
  );
}

#[test]
fn plan_editor_flag_forces_editor_build() {
  modplan_cmd()
    .arg("--project")
    .arg(fixture_path("project.json"))
    .args(["plan", "Demo", "--editor"])
    .assert()
    .success()
    .stdout(predicate::str::contains("UnrealEd"))
    .stderr(predicate::str::contains("Forcing an editor build"));
}

#[test]
fn plan_writes_output_file() {
  let temp = TempDir::new().unwrap();
  let out = temp.path().join("plan.json");

  modplan_cmd()
    .arg("--project")
    .arg(fixture_path("project.json"))
    .args(["plan", "Demo", "--output"])
    .arg(&out)
    .assert()
    .success();

  let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
  assert_eq!(written["entry_modules"], serde_json::json!(["Demo"]));
}

#[test]
fn plan_is_reproducible() {
  let run = || {
    modplan_cmd()
      .arg("--project")
      .arg(fixture_path("project.json"))
      .args(["--format", "json", "plan", "DemoEditor"])
      .output()
      .unwrap()
      .stdout
  };

  assert_eq!(run(), run());
}

#[test]
fn plan_unknown_target_fails() {
  modplan_cmd()
    .arg("--project")
    .arg(fixture_path("project.json"))
    .args(["plan", "Nope"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unknown target: Nope"));
}

#[test]
fn plan_cycle_fails_with_chain() {
  modplan_cmd()
    .arg("--project")
    .arg(fixture_path("broken.json"))
    .args(["plan", "Loop"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("cyclic public dependency: A -> B -> A"));
}

#[test]
fn plan_rejects_unknown_platform() {
  modplan_cmd()
    .arg("--project")
    .arg(fixture_path("project.json"))
    .args(["plan", "Demo", "--platform", "Amiga"])
    .assert()
    .failure();
}

#[test]
fn project_path_from_env() {
  let mut cmd = cargo_bin_cmd!("modplan");
  cmd
    .env("MODPLAN_PROJECT", fixture_path("project.json"))
    .arg("targets")
    .assert()
    .success()
    .stdout(predicate::str::contains("DemoEditor (Editor)"));
}

// =============================================================================
// Check & Targets
// =============================================================================

#[test]
fn check_passes_on_valid_project() {
  modplan_cmd()
    .arg("--project")
    .arg(fixture_path("project.json"))
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("2 target(s) and 5 module(s) are consistent"));
}

#[test]
fn check_reports_all_issues() {
  modplan_cmd()
    .arg("--project")
    .arg(fixture_path("broken.json"))
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown module 'Missing' (referenced from B)"))
    .stderr(predicate::str::contains("cyclic public dependency: A -> B -> A"))
    .stderr(predicate::str::contains("2 issue(s) found"));
}

#[test]
fn missing_project_file_fails() {
  let temp = TempDir::new().unwrap();

  modplan_cmd()
    .arg("--project")
    .arg(temp.path().join("modplan.json"))
    .arg("targets")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load project"));
}

#[test]
fn targets_lists_declared_targets() {
  modplan_cmd()
    .arg("--project")
    .arg(fixture_path("project.json"))
    .arg("targets")
    .assert()
    .success()
    .stdout(predicate::str::contains("Demo (Game)"))
    .stdout(predicate::str::contains("DemoEditor (Editor)"));
}
