//! Resolver output types and errors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::BuildContext;
use crate::util::hash::Hashable;

fn format_chain(chain: &[String]) -> String {
  if chain.is_empty() {
    String::new()
  } else {
    format!(" (referenced from {})", chain.join(" -> "))
  }
}

/// Errors that abort resolution of a target.
///
/// Every variant carries the chain of module (or target) names that led to
/// the failure, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  /// A target declared a type that is not Game, Editor, Client, or Server.
  #[error("unknown target type '{type_name}'{}", format_chain(.chain))]
  UnknownTargetType { type_name: String, chain: Vec<String> },

  /// A dependency names a module that was never declared.
  #[error("unknown module '{name}'{}", format_chain(.chain))]
  UnknownModule { name: String, chain: Vec<String> },

  /// The public dependency subgraph contains a cycle.
  #[error("cyclic public dependency: {}", .chain.join(" -> "))]
  CyclicDependency { chain: Vec<String> },

  /// A conditional addition names a predicate that is not registered.
  #[error("unknown predicate '{predicate}'{}", format_chain(.chain))]
  UnknownPredicate { predicate: String, chain: Vec<String> },
}

impl ResolveError {
  /// The reference chain that produced this error.
  pub fn chain(&self) -> &[String] {
    match self {
      ResolveError::UnknownTargetType { chain, .. }
      | ResolveError::UnknownModule { chain, .. }
      | ResolveError::CyclicDependency { chain }
      | ResolveError::UnknownPredicate { chain, .. } => chain,
    }
  }
}

/// The resolved view of a single module under one build context.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePlan {
  /// Own public include paths followed by those of every public dependency,
  /// first occurrence wins.
  pub resolved_include_paths: Vec<String>,
  /// Transitive public dependency closure, in traversal order.
  pub resolved_public_deps: Vec<String>,
  /// Directly declared private dependencies. Never propagated to dependents.
  pub resolved_private_deps: Vec<String>,
}

/// The full plan for one target, handed to the external build driver.
///
/// `modules` iterates entry modules first (in declared order), then every
/// other module the entries reach, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
  pub target: String,
  pub context: BuildContext,
  pub entry_modules: Vec<String>,
  pub modules: IndexMap<String, ModulePlan>,
}

impl BuildPlan {
  pub fn module(&self, name: &str) -> Option<&ModulePlan> {
    self.modules.get(name)
  }

  pub fn module_count(&self) -> usize {
    self.modules.len()
  }
}

impl Hashable for BuildPlan {}
