//! Conditional rule evaluation.
//!
//! A conditional addition on a module names a predicate (e.g. `"IsEditorBuild"`).
//! The [`PredicateRegistry`] maps those names to pure functions over a
//! [`BuildContext`]. New build-context axes are supported by registering more
//! predicates; the resolver never needs to change.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::context::{BuildContext, Configuration, Platform};
use crate::resolve::ResolveError;

/// A pure predicate over a build context.
pub type Predicate = Arc<dyn Fn(&BuildContext) -> bool + Send + Sync>;

/// Table of named predicates.
#[derive(Clone)]
pub struct PredicateRegistry {
  predicates: HashMap<String, Predicate>,
}

impl PredicateRegistry {
  /// An empty registry. Every evaluation fails until predicates are added.
  pub fn empty() -> Self {
    Self {
      predicates: HashMap::new(),
    }
  }

  /// Register (or replace) a predicate.
  pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
  where
    F: Fn(&BuildContext) -> bool + Send + Sync + 'static,
  {
    self.predicates.insert(name.into(), Arc::new(predicate));
  }

  pub fn contains(&self, name: &str) -> bool {
    self.predicates.contains_key(name)
  }

  /// Registered predicate names, sorted.
  pub fn names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.predicates.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }

  /// Evaluate `name` against `ctx`.
  ///
  /// Fails with [`ResolveError::UnknownPredicate`] if nothing is registered
  /// under `name`. The returned error has an empty chain; callers that know
  /// which module referenced the predicate fill it in.
  pub fn evaluate(&self, name: &str, ctx: &BuildContext) -> Result<bool, ResolveError> {
    let predicate = self.predicates.get(name).ok_or_else(|| ResolveError::UnknownPredicate {
      predicate: name.to_string(),
      chain: Vec::new(),
    })?;

    let holds = predicate(ctx);
    trace!(predicate = name, %ctx, holds, "evaluated predicate");
    Ok(holds)
  }
}

impl Default for PredicateRegistry {
  /// The standard predicates: editor/runtime, one per platform, desktop, and
  /// one per configuration.
  fn default() -> Self {
    let mut registry = Self::empty();

    registry.register("IsEditorBuild", |ctx| ctx.is_editor_build);
    registry.register("IsRuntimeBuild", |ctx| !ctx.is_editor_build);
    registry.register("IsDesktopPlatform", |ctx| ctx.platform.is_desktop());

    for platform in Platform::ALL {
      registry.register(format!("Is{}", platform.as_str()), move |ctx| ctx.platform == platform);
    }
    for configuration in Configuration::ALL {
      registry.register(format!("Is{}", configuration.as_str()), move |ctx| {
        ctx.configuration == configuration
      });
    }

    registry
  }
}

impl fmt::Debug for PredicateRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PredicateRegistry").field("predicates", &self.names()).finish()
  }
}
