//! modplan-lib: module dependency and include-path resolution.
//!
//! This crate turns immutable build descriptors into build plans:
//! - `descriptor`: target and module declarations, and the store holding them
//! - `context`: the build parameters a resolution pass runs under
//! - `rules`: named predicates gating conditional dependencies
//! - `resolve`: per-module and per-target resolution into a `BuildPlan`

pub mod consts;
pub mod context;
pub mod descriptor;
pub mod rules;
pub mod resolve;
pub mod util;

pub use context::{BuildContext, Configuration, Platform};
pub use descriptor::{DescriptorError, DescriptorSet, ModuleDescriptor, TargetDescriptor, TargetType};
pub use resolve::{BuildPlan, ModulePlan, ResolveError, TargetResolver};
pub use rules::PredicateRegistry;
