//! Dependency resolution.
//!
//! - [`module`] - Per-module public closure and include path resolution
//! - [`target`] - Whole-target resolution into a [`BuildPlan`]
//! - [`types`] - Plans and the [`ResolveError`] taxonomy

pub mod module;
pub mod target;
mod types;

pub use module::ModuleResolver;
pub use target::{TargetResolver, resolve_all};
pub use types::*;
