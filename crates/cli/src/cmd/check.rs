//! Implementation of the `modplan check` command.
//!
//! Validates the whole descriptor set and exits non-zero if any problem is
//! found.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use modplan_lib::{DescriptorSet, PredicateRegistry, ResolveError};

use crate::output::{OutputFormat, print_error, print_json, print_success};

#[derive(Serialize)]
struct Issue<'a> {
  kind: &'static str,
  message: String,
  chain: &'a [String],
}

fn issue_kind(issue: &ResolveError) -> &'static str {
  match issue {
    ResolveError::UnknownTargetType { .. } => "unknown_target_type",
    ResolveError::UnknownModule { .. } => "unknown_module",
    ResolveError::CyclicDependency { .. } => "cyclic_dependency",
    ResolveError::UnknownPredicate { .. } => "unknown_predicate",
  }
}

pub fn cmd_check(project: &Path, format: OutputFormat) -> Result<()> {
  let descriptors =
    DescriptorSet::load(project).with_context(|| format!("Failed to load project: {}", project.display()))?;

  let rules = PredicateRegistry::default();
  let issues = descriptors.validate(&rules);
  debug!(issues = issues.len(), "validation finished");

  if format.is_json() {
    let report: Vec<Issue> = issues
      .iter()
      .map(|issue| Issue {
        kind: issue_kind(issue),
        message: issue.to_string(),
        chain: issue.chain(),
      })
      .collect();
    print_json(&report)?;
  } else if issues.is_empty() {
    print_success(&format!(
      "{} target(s) and {} module(s) are consistent",
      descriptors.target_count(),
      descriptors.module_count()
    ));
  } else {
    for issue in &issues {
      print_error(&issue.to_string());
    }
  }

  if !issues.is_empty() {
    bail!("{} issue(s) found in {}", issues.len(), project.display());
  }

  Ok(())
}
