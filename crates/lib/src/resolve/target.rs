//! Target-level resolution.
//!
//! A target names its entry modules; the target resolver resolves each of
//! them and then every module they reach (through public *or* private edges)
//! so the build driver receives a plan for every module it has to compile.

use std::collections::VecDeque;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info};

use super::module::ModuleResolver;
use super::types::{BuildPlan, ResolveError};
use crate::context::BuildContext;
use crate::descriptor::{DescriptorSet, TargetDescriptor};
use crate::rules::PredicateRegistry;

/// Resolves whole targets into [`BuildPlan`]s.
///
/// The target type needs no runtime validation here: [`TargetDescriptor`]
/// holds a typed [`crate::descriptor::TargetType`], and unknown type names are
/// rejected with [`ResolveError::UnknownTargetType`] when descriptors are
/// parsed.
pub struct TargetResolver<'a> {
  modules: ModuleResolver<'a>,
}

impl<'a> TargetResolver<'a> {
  pub fn new(descriptors: &'a DescriptorSet, rules: &'a PredicateRegistry) -> Self {
    Self {
      modules: ModuleResolver::new(descriptors, rules),
    }
  }

  /// Resolve `target` under `ctx`.
  ///
  /// The returned plan lists entry modules first, in declared order, followed
  /// by every other reachable module in breadth-first discovery order. The
  /// first error aborts the target.
  pub fn resolve(&mut self, target: &TargetDescriptor, ctx: &BuildContext) -> Result<BuildPlan, ResolveError> {
    info!(target_name = %target.name, kind = %target.target_type, %ctx, "resolving target");

    let mut modules = IndexMap::new();
    // Each queued module carries the names that led to it, target first.
    let mut queue: VecDeque<(String, Vec<String>)> = target
      .entry_modules
      .iter()
      .map(|name| (name.clone(), vec![target.name.clone()]))
      .collect();

    while let Some((name, referrers)) = queue.pop_front() {
      if modules.contains_key(&name) {
        continue;
      }

      let plan = self
        .modules
        .resolve(&name, ctx)
        .map_err(|e| with_referrers(e, &referrers))?;

      let mut via = referrers;
      via.push(name.clone());
      queue.extend(
        plan
          .resolved_public_deps
          .iter()
          .chain(&plan.resolved_private_deps)
          .filter(|dep| !modules.contains_key(dep.as_str()))
          .map(|dep| (dep.clone(), via.clone())),
      );
      modules.insert(name, plan);
    }

    debug!(target_name = %target.name, modules = modules.len(), "target resolved");

    Ok(BuildPlan {
      target: target.name.clone(),
      context: *ctx,
      entry_modules: target.entry_modules.clone(),
      modules,
    })
  }
}

/// Prefix the chain of a module-level error with the names that led the
/// target to that module. A cycle chain is left as the cycle itself.
fn with_referrers(err: ResolveError, referrers: &[String]) -> ResolveError {
  let prefixed = |chain: Vec<String>| -> Vec<String> { referrers.iter().cloned().chain(chain).collect() };
  match err {
    ResolveError::UnknownModule { name, chain } => ResolveError::UnknownModule {
      name,
      chain: prefixed(chain),
    },
    ResolveError::UnknownPredicate { predicate, chain } => ResolveError::UnknownPredicate {
      predicate,
      chain: prefixed(chain),
    },
    other => other,
  }
}

/// Resolve several targets on the rayon pool.
///
/// Each worker owns its own [`ModuleResolver`] cache, so no state is shared
/// between threads. Results come back in the order of `targets`; a failure in
/// one target does not affect the others.
pub fn resolve_all<F>(
  descriptors: &DescriptorSet,
  rules: &PredicateRegistry,
  targets: &[&TargetDescriptor],
  context_for: F,
) -> Vec<Result<BuildPlan, ResolveError>>
where
  F: Fn(&TargetDescriptor) -> BuildContext + Sync,
{
  targets
    .par_iter()
    .map_init(
      || TargetResolver::new(descriptors, rules),
      |resolver, &target| resolver.resolve(target, &context_for(target)),
    )
    .collect()
}
