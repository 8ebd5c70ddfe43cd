//! Per-module dependency resolution.
//!
//! # Algorithm Overview
//!
//! 1. Look up the module's descriptor
//! 2. Seed include paths with the module's own public include paths
//! 3. Append public dependencies from every conditional addition whose
//!    predicate holds for the context
//! 4. Depth-first over public edges only, merging each dependency's include
//!    paths and public closure into this module's result
//! 5. Resolve private dependencies for local use and record their names;
//!    nothing flows back through a private edge
//!
//! Results are memoized by `(module name, context)`. The current recursion
//! path doubles as the cycle detector and as the reference chain for errors.
//! Each private edge opens a new segment of the path: a cycle is only
//! reported when a module repeats within one segment, so loops that pass
//! through a private edge stay legal.

use std::collections::HashMap;

use indexmap::IndexSet;
use tracing::{debug, trace};

use super::types::{ModulePlan, ResolveError};
use crate::context::BuildContext;
use crate::descriptor::{DescriptorSet, ModuleDescriptor};
use crate::rules::PredicateRegistry;

type MemoKey = (String, BuildContext);

/// Resolves modules against a descriptor set, caching every module it visits.
///
/// A resolver is cheap to create and owns its cache, so parallel callers give
/// each worker its own instance.
pub struct ModuleResolver<'a> {
  descriptors: &'a DescriptorSet,
  rules: &'a PredicateRegistry,
  memo: HashMap<MemoKey, ModulePlan>,
}

impl<'a> ModuleResolver<'a> {
  pub fn new(descriptors: &'a DescriptorSet, rules: &'a PredicateRegistry) -> Self {
    Self {
      descriptors,
      rules,
      memo: HashMap::new(),
    }
  }

  /// Resolve `name` under `ctx`.
  pub fn resolve(&mut self, name: &str, ctx: &BuildContext) -> Result<ModulePlan, ResolveError> {
    let mut path = Vec::new();
    self.resolve_on_path(name, ctx, &mut path, 0)
  }

  /// Number of `(module, context)` pairs currently cached.
  pub fn cached_count(&self) -> usize {
    self.memo.len()
  }

  fn resolve_on_path(
    &mut self,
    name: &str,
    ctx: &BuildContext,
    path: &mut Vec<String>,
    segment: usize,
  ) -> Result<ModulePlan, ResolveError> {
    if let Some(offset) = path[segment..].iter().position(|p| p == name) {
      let mut chain = path[segment + offset..].to_vec();
      chain.push(name.to_string());
      return Err(ResolveError::CyclicDependency { chain });
    }

    let key = (name.to_string(), *ctx);
    if let Some(plan) = self.memo.get(&key) {
      trace!(module = name, "memo hit");
      return Ok(plan.clone());
    }

    let descriptors = self.descriptors;
    let descriptor = descriptors.module(name).ok_or_else(|| ResolveError::UnknownModule {
      name: name.to_string(),
      chain: path.clone(),
    })?;

    path.push(name.to_string());
    let result = self.expand(descriptor, ctx, path, segment);
    path.pop();

    let plan = result?;
    debug!(
      module = name,
      public = plan.resolved_public_deps.len(),
      private = plan.resolved_private_deps.len(),
      includes = plan.resolved_include_paths.len(),
      "resolved module"
    );
    self.memo.insert(key, plan.clone());
    Ok(plan)
  }

  fn expand(
    &mut self,
    descriptor: &'a ModuleDescriptor,
    ctx: &BuildContext,
    path: &mut Vec<String>,
    segment: usize,
  ) -> Result<ModulePlan, ResolveError> {
    let mut include_paths: IndexSet<String> = descriptor.public_include_paths.iter().cloned().collect();
    let mut direct_public: IndexSet<&'a str> = descriptor
      .public_dependency_module_names
      .iter()
      .map(String::as_str)
      .collect();

    for addition in &descriptor.conditional_additions {
      let active = self
        .rules
        .evaluate(&addition.predicate_name, ctx)
        .map_err(|_| ResolveError::UnknownPredicate {
          predicate: addition.predicate_name.clone(),
          chain: path.clone(),
        })?;

      if active {
        debug!(
          module = %descriptor.name,
          predicate = %addition.predicate_name,
          added = ?addition.public_dependency_module_names,
          "conditional addition applied"
        );
        direct_public.extend(addition.public_dependency_module_names.iter().map(String::as_str));
      }
    }

    let mut public_deps: IndexSet<String> = IndexSet::new();
    for dep in direct_public {
      let dep_plan = self.resolve_on_path(dep, ctx, path, segment)?;
      public_deps.insert(dep.to_string());
      public_deps.extend(dep_plan.resolved_public_deps);
      include_paths.extend(dep_plan.resolved_include_paths);
    }

    let mut private_deps: IndexSet<String> = IndexSet::new();
    for dep in &descriptor.private_dependency_module_names {
      // Public visibility already covers it.
      if public_deps.contains(dep) {
        continue;
      }
      // Still in progress further up the path; that frame reports its own errors.
      if !path.contains(dep) {
        let segment = path.len();
        self.resolve_on_path(dep, ctx, path, segment)?;
      }
      private_deps.insert(dep.clone());
    }

    Ok(ModulePlan {
      resolved_include_paths: include_paths.into_iter().collect(),
      resolved_public_deps: public_deps.into_iter().collect(),
      resolved_private_deps: private_deps.into_iter().collect(),
    })
  }
}
