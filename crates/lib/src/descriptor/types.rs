//! Target and module descriptor types.
//!
//! Descriptors are plain immutable data. They are produced either by parsing a
//! project file (see [`super::DescriptorSet::load`]) or programmatically via the
//! builder methods on [`ModuleDescriptor`] and [`TargetDescriptor`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::resolve::ResolveError;

/// The kind of artifact a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
  Game,
  Editor,
  Client,
  Server,
}

impl TargetType {
  pub const ALL: [TargetType; 4] = [TargetType::Game, TargetType::Editor, TargetType::Client, TargetType::Server];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Game => "Game",
      Self::Editor => "Editor",
      Self::Client => "Client",
      Self::Server => "Server",
    }
  }
}

impl fmt::Display for TargetType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for TargetType {
  type Err = ResolveError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|t| t.as_str() == s)
      .ok_or_else(|| ResolveError::UnknownTargetType {
        type_name: s.to_string(),
        chain: Vec::new(),
      })
  }
}

/// Precompiled header usage for a module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PchUsage {
  #[serde(rename = "NoPCH")]
  NoPch,
  #[serde(rename = "UseSharedPCH")]
  UseSharedPch,
  #[default]
  #[serde(rename = "UseExplicitOrSharedPCH")]
  UseExplicitOrSharedPch,
}

/// A set of public dependencies that only apply when a named predicate holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalAddition {
  pub predicate_name: String,
  #[serde(default)]
  pub public_dependency_module_names: Vec<String>,
}

/// A compilation unit with its include paths and dependency lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
  pub name: String,
  #[serde(default)]
  pub pch_usage: PchUsage,
  #[serde(default)]
  pub public_include_paths: Vec<String>,
  #[serde(default)]
  pub public_dependency_module_names: Vec<String>,
  #[serde(default)]
  pub private_dependency_module_names: Vec<String>,
  #[serde(default)]
  pub conditional_additions: Vec<ConditionalAddition>,
}

impl ModuleDescriptor {
  /// Create a module with no paths or dependencies.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      pch_usage: PchUsage::default(),
      public_include_paths: Vec::new(),
      public_dependency_module_names: Vec::new(),
      private_dependency_module_names: Vec::new(),
      conditional_additions: Vec::new(),
    }
  }

  pub fn pch_usage(mut self, usage: PchUsage) -> Self {
    self.pch_usage = usage;
    self
  }

  pub fn include_paths<I, S>(mut self, paths: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.public_include_paths.extend(paths.into_iter().map(Into::into));
    self
  }

  pub fn public_deps<I, S>(mut self, deps: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.public_dependency_module_names.extend(deps.into_iter().map(Into::into));
    self
  }

  pub fn private_deps<I, S>(mut self, deps: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.private_dependency_module_names.extend(deps.into_iter().map(Into::into));
    self
  }

  /// Add public dependencies gated on `predicate`.
  pub fn when<I, S>(mut self, predicate: impl Into<String>, deps: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.conditional_additions.push(ConditionalAddition {
      predicate_name: predicate.into(),
      public_dependency_module_names: deps.into_iter().map(Into::into).collect(),
    });
    self
  }

  /// Every module name this descriptor references, conditional or not.
  pub fn referenced_modules(&self) -> impl Iterator<Item = &str> {
    self
      .public_dependency_module_names
      .iter()
      .chain(&self.private_dependency_module_names)
      .chain(
        self
          .conditional_additions
          .iter()
          .flat_map(|c| &c.public_dependency_module_names),
      )
      .map(String::as_str)
  }
}

fn default_build_settings_version() -> String {
  "Latest".to_string()
}

/// A top-level buildable artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetDescriptor {
  pub name: String,
  #[serde(rename = "type")]
  pub target_type: TargetType,
  pub build_settings_version: String,
  pub entry_modules: Vec<String>,
}

impl TargetDescriptor {
  pub fn new(name: impl Into<String>, target_type: TargetType) -> Self {
    Self {
      name: name.into(),
      target_type,
      build_settings_version: default_build_settings_version(),
      entry_modules: Vec::new(),
    }
  }

  pub fn build_settings_version(mut self, version: impl Into<String>) -> Self {
    self.build_settings_version = version.into();
    self
  }

  pub fn entry_modules<I, S>(mut self, modules: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.entry_modules.extend(modules.into_iter().map(Into::into));
    self
  }
}

/// A target as written in a project file, before its type is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetDecl {
  pub name: String,
  #[serde(rename = "type")]
  pub target_type: String,
  #[serde(default = "default_build_settings_version")]
  pub build_settings_version: String,
  #[serde(default)]
  pub entry_modules: Vec<String>,
}

impl TryFrom<TargetDecl> for TargetDescriptor {
  type Error = ResolveError;

  fn try_from(decl: TargetDecl) -> Result<Self, Self::Error> {
    let target_type = decl.target_type.parse::<TargetType>().map_err(|e| match e {
      ResolveError::UnknownTargetType { type_name, .. } => ResolveError::UnknownTargetType {
        type_name,
        chain: vec![decl.name.clone()],
      },
      other => other,
    })?;

    Ok(Self {
      name: decl.name,
      target_type,
      build_settings_version: decl.build_settings_version,
      entry_modules: decl.entry_modules,
    })
  }
}
