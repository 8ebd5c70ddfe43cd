//! Implementation of the `modplan plan` command.
//!
//! Loads the project descriptors, resolves one target under the requested
//! build context, and prints the resulting plan (optionally writing it to a
//! file for the build driver).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use tracing::info;

use modplan_lib::util::hash::Hashable;
use modplan_lib::{
  BuildContext, BuildPlan, Configuration, DescriptorSet, Platform, PredicateRegistry, TargetResolver, TargetType,
};

use crate::output::{
  OutputFormat, format_list, print_json, print_stat, print_success, print_warning, symbols, truncate_hash,
};

pub struct PlanOptions {
  pub target: String,
  pub editor: bool,
  pub platform: Platform,
  pub configuration: Configuration,
  pub output: Option<PathBuf>,
}

pub fn cmd_plan(project: &Path, options: &PlanOptions, format: OutputFormat, verbose: bool) -> Result<()> {
  let descriptors =
    DescriptorSet::load(project).with_context(|| format!("Failed to load project: {}", project.display()))?;

  let target = descriptors
    .target(&options.target)
    .with_context(|| format!("Unknown target: {}", options.target))?;

  let mut ctx = BuildContext::for_target(target.target_type, options.platform, options.configuration);
  if options.editor && target.target_type != TargetType::Editor {
    print_warning(&format!(
      "Forcing an editor build for {} target '{}'",
      target.target_type, target.name
    ));
    ctx.is_editor_build = true;
  }

  let rules = PredicateRegistry::default();
  let plan = TargetResolver::new(&descriptors, &rules)
    .resolve(target, &ctx)
    .with_context(|| format!("Failed to resolve target: {}", target.name))?;

  if let Some(path) = &options.output {
    let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
    fs::write(path, json).with_context(|| format!("Failed to write plan: {}", path.display()))?;
    info!(path = %path.display(), "plan written");
  }

  if format.is_json() {
    return print_json(&plan);
  }

  let hash = plan.compute_hash().context("Failed to compute plan hash")?;
  print_text(&plan, &hash.0, verbose);

  if let Some(path) = &options.output {
    print_success(&format!("Wrote plan to {}", path.display()));
  }

  Ok(())
}

fn print_text(plan: &BuildPlan, hash: &str, verbose: bool) {
  print_success(&format!("Plan for {} [{}]", plan.target, plan.context));
  print_stat("Hash", truncate_hash(hash));
  print_stat("Entry modules", &format_list(&plan.entry_modules));
  print_stat("Modules", &plan.module_count().to_string());

  for (name, module) in &plan.modules {
    println!();
    println!(
      "{} {}",
      symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
      name.if_supports_color(Stream::Stdout, |s| s.bold())
    );
    print_stat("Public", &format_list(&module.resolved_public_deps));
    print_stat("Private", &format_list(&module.resolved_private_deps));

    if verbose {
      print_stat("Includes", &format_list(&module.resolved_include_paths));
    } else {
      print_stat("Includes", &module.resolved_include_paths.len().to_string());
    }
  }
}
