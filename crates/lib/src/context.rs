//! Build context: the parameters a single resolution pass is run under.
//!
//! A [`BuildContext`] is constructed once per build invocation and never
//! stored in descriptors. It is hashable so it can key the resolver's memo
//! cache alongside a module name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::descriptor::TargetType;

/// Platforms a build can be produced for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
  #[default]
  Win64,
  Linux,
  Mac,
  Android,
  #[serde(rename = "IOS")]
  Ios,
}

impl Platform {
  pub const ALL: [Platform; 5] = [
    Platform::Win64,
    Platform::Linux,
    Platform::Mac,
    Platform::Android,
    Platform::Ios,
  ];

  /// Returns the canonical identifier for this platform
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Win64 => "Win64",
      Self::Linux => "Linux",
      Self::Mac => "Mac",
      Self::Android => "Android",
      Self::Ios => "IOS",
    }
  }

  /// Whether this platform hosts the editor.
  pub fn is_desktop(&self) -> bool {
    matches!(self, Self::Win64 | Self::Linux | Self::Mac)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Platform {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|p| p.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| format!("unknown platform '{}'", s))
  }
}

/// Build configurations, from least to most optimized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Configuration {
  Debug,
  DebugGame,
  #[default]
  Development,
  Test,
  Shipping,
}

impl Configuration {
  pub const ALL: [Configuration; 5] = [
    Configuration::Debug,
    Configuration::DebugGame,
    Configuration::Development,
    Configuration::Test,
    Configuration::Shipping,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::DebugGame => "DebugGame",
      Self::Development => "Development",
      Self::Test => "Test",
      Self::Shipping => "Shipping",
    }
  }
}

impl fmt::Display for Configuration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Configuration {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|c| c.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| format!("unknown configuration '{}'", s))
  }
}

/// Parameters that drive conditional resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildContext {
  pub is_editor_build: bool,
  pub platform: Platform,
  pub configuration: Configuration,
}

impl BuildContext {
  pub fn new(is_editor_build: bool, platform: Platform, configuration: Configuration) -> Self {
    Self {
      is_editor_build,
      platform,
      configuration,
    }
  }

  /// Context for building the given target type.
  ///
  /// Editor targets always produce an editor build; every other type is a
  /// runtime build.
  pub fn for_target(target_type: TargetType, platform: Platform, configuration: Configuration) -> Self {
    Self::new(target_type == TargetType::Editor, platform, configuration)
  }

  /// Shorthand for a Win64 Development context.
  pub fn editor() -> Self {
    Self::new(true, Platform::default(), Configuration::default())
  }

  /// Shorthand for a Win64 Development runtime (non-editor) context.
  pub fn runtime() -> Self {
    Self::new(false, Platform::default(), Configuration::default())
  }
}

impl fmt::Display for BuildContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let kind = if self.is_editor_build { "editor" } else { "runtime" };
    write!(f, "{} {} ({})", self.platform, self.configuration, kind)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn platform_parses_case_insensitively() {
    assert_eq!("linux".parse::<Platform>().unwrap(), Platform::Linux);
    assert_eq!("ios".parse::<Platform>().unwrap(), Platform::Ios);
    assert!("amiga".parse::<Platform>().is_err());
  }

  #[test]
  fn configuration_round_trips_through_as_str() {
    for config in Configuration::ALL {
      assert_eq!(config.as_str().parse::<Configuration>().unwrap(), config);
    }
  }

  #[test]
  fn editor_target_implies_editor_build() {
    let ctx = BuildContext::for_target(TargetType::Editor, Platform::Linux, Configuration::Debug);
    assert!(ctx.is_editor_build);

    for ty in [TargetType::Game, TargetType::Client, TargetType::Server] {
      let ctx = BuildContext::for_target(ty, Platform::Linux, Configuration::Debug);
      assert!(!ctx.is_editor_build, "{} should be a runtime build", ty);
    }
  }

  #[test]
  fn display_names_kind() {
    assert_eq!(BuildContext::runtime().to_string(), "Win64 Development (runtime)");
    assert_eq!(BuildContext::editor().to_string(), "Win64 Development (editor)");
  }
}
