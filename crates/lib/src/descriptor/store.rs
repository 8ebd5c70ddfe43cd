//! The descriptor store: every target and module declared by a project.
//!
//! # Project File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "targets": [
//!     { "name": "SLFConversion", "type": "Game", "entry_modules": ["SLFConversion"] }
//!   ],
//!   "modules": [
//!     {
//!       "name": "SLFConversion",
//!       "public_include_paths": ["SLFConversion"],
//!       "public_dependency_module_names": ["Core", "Engine"],
//!       "conditional_additions": [
//!         { "predicate_name": "IsEditorBuild", "public_dependency_module_names": ["UnrealEd"] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::types::{ModuleDescriptor, TargetDecl, TargetDescriptor};
use crate::consts::PROJECT_VERSION;
use crate::resolve::ResolveError;

/// Errors that can occur while loading or assembling descriptors.
#[derive(Debug, Error)]
pub enum DescriptorError {
  /// Failed to read the project file.
  #[error("failed to read project file: {0}")]
  Read(#[source] io::Error),

  /// Failed to parse the project file JSON.
  #[error("failed to parse project file: {0}")]
  Parse(#[source] serde_json::Error),

  /// Project file version is not supported.
  #[error("unsupported project file version {0}, expected {PROJECT_VERSION}")]
  UnsupportedVersion(u32),

  /// Two modules share a name.
  #[error("module '{0}' is declared more than once")]
  DuplicateModule(String),

  /// Two targets share a name.
  #[error("target '{0}' is declared more than once")]
  DuplicateTarget(String),

  /// A target declaration is invalid (e.g. unknown target type).
  #[error(transparent)]
  InvalidTarget(#[from] ResolveError),
}

fn default_version() -> u32 {
  PROJECT_VERSION
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
  #[serde(default = "default_version")]
  version: u32,
  #[serde(default)]
  targets: Vec<TargetDecl>,
  #[serde(default)]
  modules: Vec<ModuleDescriptor>,
}

/// Immutable set of declared targets and modules.
///
/// Uses [`BTreeMap`] so iteration (and therefore validation output) is
/// deterministic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DescriptorSet {
  targets: BTreeMap<String, TargetDescriptor>,
  modules: BTreeMap<String, ModuleDescriptor>,
}

impl DescriptorSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a module declaration.
  pub fn add_module(&mut self, module: ModuleDescriptor) -> Result<(), DescriptorError> {
    if self.modules.contains_key(&module.name) {
      return Err(DescriptorError::DuplicateModule(module.name));
    }
    self.modules.insert(module.name.clone(), module);
    Ok(())
  }

  /// Add a target declaration.
  pub fn add_target(&mut self, target: TargetDescriptor) -> Result<(), DescriptorError> {
    if self.targets.contains_key(&target.name) {
      return Err(DescriptorError::DuplicateTarget(target.name));
    }
    self.targets.insert(target.name.clone(), target);
    Ok(())
  }

  /// Build a set from module declarations alone.
  pub fn from_modules<I>(modules: I) -> Result<Self, DescriptorError>
  where
    I: IntoIterator<Item = ModuleDescriptor>,
  {
    let mut set = Self::new();
    for module in modules {
      set.add_module(module)?;
    }
    Ok(set)
  }

  pub fn module(&self, name: &str) -> Option<&ModuleDescriptor> {
    self.modules.get(name)
  }

  pub fn target(&self, name: &str) -> Option<&TargetDescriptor> {
    self.targets.get(name)
  }

  pub fn modules(&self) -> impl Iterator<Item = &ModuleDescriptor> {
    self.modules.values()
  }

  pub fn targets(&self) -> impl Iterator<Item = &TargetDescriptor> {
    self.targets.values()
  }

  pub fn module_count(&self) -> usize {
    self.modules.len()
  }

  pub fn target_count(&self) -> usize {
    self.targets.len()
  }

  /// Parse a project file from its JSON text.
  pub fn from_json(content: &str) -> Result<Self, DescriptorError> {
    let project: ProjectFile = serde_json::from_str(content).map_err(DescriptorError::Parse)?;

    if project.version != PROJECT_VERSION {
      return Err(DescriptorError::UnsupportedVersion(project.version));
    }

    let mut set = Self::new();
    for decl in project.targets {
      set.add_target(TargetDescriptor::try_from(decl)?)?;
    }
    for module in project.modules {
      set.add_module(module)?;
    }

    debug!(
      targets = set.target_count(),
      modules = set.module_count(),
      "loaded project descriptors"
    );
    Ok(set)
  }

  /// Load a project file from disk.
  pub fn load(path: &Path) -> Result<Self, DescriptorError> {
    let content = fs::read_to_string(path).map_err(DescriptorError::Read)?;
    Self::from_json(&content)
  }
}
