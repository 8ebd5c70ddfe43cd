use std::path::Path;

use anyhow::{Context, Result};

use modplan_lib::DescriptorSet;

use crate::output::{OutputFormat, format_list, print_info, print_json, print_stat};

pub fn cmd_targets(project: &Path, format: OutputFormat) -> Result<()> {
  let descriptors =
    DescriptorSet::load(project).with_context(|| format!("Failed to load project: {}", project.display()))?;

  if format.is_json() {
    let targets: Vec<_> = descriptors.targets().collect();
    return print_json(&targets);
  }

  if descriptors.target_count() == 0 {
    print_info("No targets declared.");
    return Ok(());
  }

  for target in descriptors.targets() {
    println!("{} ({})", target.name, target.target_type);
    print_stat("Entry modules", &format_list(&target.entry_modules));
    print_stat("Build settings", &target.build_settings_version);
  }

  Ok(())
}
