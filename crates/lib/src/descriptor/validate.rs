//! Whole-set consistency checks.
//!
//! Resolution stops at the first error and only sees what one context
//! reaches. Validation instead walks every declaration and reports every
//! problem it finds:
//! - dangling module references (dependency lists and target entry lists)
//! - conditional additions naming unregistered predicates
//! - public dependency cycles, treating every conditional addition as active
//!
//! Cycle checking is conservative: two additions gated on mutually exclusive
//! predicates can be reported as a cycle that no real context produces.

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use super::store::DescriptorSet;
use crate::resolve::ResolveError;
use crate::rules::PredicateRegistry;

impl DescriptorSet {
  /// Check every declaration, returning all problems found (empty if valid).
  pub fn validate(&self, rules: &PredicateRegistry) -> Vec<ResolveError> {
    let mut issues = Vec::new();

    for target in self.targets() {
      for entry in &target.entry_modules {
        if self.module(entry).is_none() {
          issues.push(ResolveError::UnknownModule {
            name: entry.clone(),
            chain: vec![target.name.clone()],
          });
        }
      }
    }

    for module in self.modules() {
      let mut seen = BTreeSet::new();
      for dep in module.referenced_modules() {
        if self.module(dep).is_none() && seen.insert(dep) {
          issues.push(ResolveError::UnknownModule {
            name: dep.to_string(),
            chain: vec![module.name.clone()],
          });
        }
      }

      for addition in &module.conditional_additions {
        if !rules.contains(&addition.predicate_name) {
          issues.push(ResolveError::UnknownPredicate {
            predicate: addition.predicate_name.clone(),
            chain: vec![module.name.clone()],
          });
        }
      }
    }

    issues.extend(self.public_cycles().into_iter().map(|chain| ResolveError::CyclicDependency { chain }));

    debug!(issues = issues.len(), "validated descriptor set");
    issues
  }

  /// Find cycles in the public subgraph (conditional edges included).
  ///
  /// Each cycle is reported once, as a closed walk starting and ending at the
  /// same module, e.g. `["A", "B", "A"]`.
  pub fn public_cycles(&self) -> Vec<Vec<String>> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

    for module in self.modules() {
      nodes.insert(module.name.as_str(), graph.add_node(module.name.as_str()));
    }

    for module in self.modules() {
      let from = nodes[module.name.as_str()];
      let public = module.public_dependency_module_names.iter().chain(
        module
          .conditional_additions
          .iter()
          .flat_map(|c| &c.public_dependency_module_names),
      );
      for dep in public {
        if let Some(&to) = nodes.get(dep.as_str()) {
          graph.update_edge(from, to, ());
        }
      }
    }

    let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| closed_walk(&graph, &scc))
      .collect();
    cycles.sort();
    cycles
  }
}

/// Walk a strongly connected component until a node repeats.
///
/// Starts at the lexicographically smallest member and always steps to the
/// smallest successor inside the component, so the result is deterministic.
fn closed_walk(graph: &DiGraph<&str, ()>, scc: &[NodeIndex]) -> Vec<String> {
  let members: BTreeSet<NodeIndex> = scc.iter().copied().collect();
  let mut current = scc.iter().copied().min_by_key(|&idx| graph[idx]).unwrap_or(scc[0]);
  let mut walk: Vec<NodeIndex> = Vec::new();

  loop {
    if let Some(start) = walk.iter().position(|&idx| idx == current) {
      let mut chain: Vec<String> = walk[start..].iter().map(|&idx| graph[idx].to_string()).collect();
      chain.push(graph[current].to_string());
      return chain;
    }
    walk.push(current);

    let next = graph
      .neighbors(current)
      .filter(|idx| members.contains(idx))
      .min_by_key(|&idx| graph[idx]);
    match next {
      Some(next) => current = next,
      None => return walk.iter().map(|&idx| graph[idx].to_string()).collect(),
    }
  }
}
